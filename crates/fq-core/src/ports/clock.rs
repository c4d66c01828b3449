/// Wall-clock source in epoch milliseconds.
pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[cfg(test)]
mockall::mock! {
    pub Clock {}

    impl ClockPort for Clock {
        fn now_ms(&self) -> i64;
    }
}
