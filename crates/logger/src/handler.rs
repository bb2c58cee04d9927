use message::{Level, Message};

/// Receives every message a logger emits, after it has been written.
pub trait Handler: Send + Sync {
    fn handle(&self, message: &Message);
}

impl<F> Handler for F
where
    F: Fn(&Message) + Send + Sync,
{
    fn handle(&self, message: &Message) {
        self(message)
    }
}

/// Forwards only messages of one level to the inner handler.
pub struct LevelFilter<H> {
    level: Level,
    inner: H,
}

impl<H: Handler> LevelFilter<H> {
    pub fn new(level: Level, inner: H) -> Self {
        Self { level, inner }
    }
}

impl<H: Handler> Handler for LevelFilter<H> {
    fn handle(&self, message: &Message) {
        if message.level() == self.level {
            self.inner.handle(message);
        }
    }
}
