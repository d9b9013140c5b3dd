use std::time::Duration;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// A short notification which closes itself after a while.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    message: String,
    duration: Duration,
    open: bool,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: DEFAULT_DURATION,
            open: false,
        }
    }

    pub fn with_duration(self, duration: Duration) -> Self {
        Self { duration, ..self }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Wait until the toast is dismissed automatically and close it.
    ///
    /// Returns immediately if the toast is not open. Dropping the future
    /// cancels the timer and leaves the toast open.
    pub async fn auto_dismiss(&mut self) {
        if !self.open {
            return;
        }
        tokio::time::sleep(self.duration).await;
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_duration() {
        let toast = Toast::new("링크가 복사되었습니다");
        assert_eq!(toast.duration(), Duration::from_millis(3000));
        assert!(!toast.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn auto_dismiss() {
        // Arrange
        let mut toast = Toast::new("Copied").with_duration(Duration::from_millis(500));
        toast.open();
        let start = tokio::time::Instant::now();

        // Act
        toast.auto_dismiss().await;

        // Assert
        assert!(!toast.is_open());
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled() {
        // Arrange
        let mut toast = Toast::new("Copied");
        toast.open();

        // Act
        let result =
            tokio::time::timeout(Duration::from_millis(1000), toast.auto_dismiss()).await;

        // Assert
        assert!(result.is_err());
        assert!(toast.is_open());
    }

    #[tokio::test]
    async fn closed_toast_returns_immediately() {
        let mut toast = Toast::new("Copied");
        toast.auto_dismiss().await;
        assert!(!toast.is_open());
    }
}
