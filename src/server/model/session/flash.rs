use tower_sessions::Session;

use crate::{model::api::FlashDto, server::error::Error};

pub const SESSION_FLASH_KEY: &str = "zrl:flash";

/// Queue of one-shot messages shown on the next page load.
pub struct SessionFlash;

impl SessionFlash {
    /// Append a message to the queue
    pub async fn push(
        session: &Session,
        category: &str,
        message: impl Into<String>,
    ) -> Result<(), Error> {
        let mut queue = session
            .get::<Vec<FlashDto>>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default();

        queue.push(FlashDto {
            category: category.to_string(),
            message: message.into(),
        });

        session.insert(SESSION_FLASH_KEY, queue).await?;

        Ok(())
    }

    /// Remove and return every queued message
    pub async fn take(session: &Session) -> Result<Vec<FlashDto>, Error> {
        Ok(session
            .remove::<Vec<FlashDto>>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use zrl_test_utils::prelude::*;

    use crate::server::model::session::flash::SessionFlash;

    /// Expected: messages come back in order and the queue is emptied
    #[tokio::test]
    async fn take_drains_queue_in_order() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        SessionFlash::push(&test.session, "warning", "first").await.unwrap();
        SessionFlash::push(&test.session, "success", "second").await.unwrap();

        let messages = SessionFlash::take(&test.session).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message, "first");
        assert_eq!(messages[1].category, "success");

        let drained = SessionFlash::take(&test.session).await.unwrap();
        assert!(drained.is_empty());

        Ok(())
    }
}
