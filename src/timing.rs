pub struct Throttle {
    interval_ms: f64,
    open_at: f64,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            open_at: 0.0,
        }
    }

    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        if now_ms < self.open_at {
            return false;
        }

        self.open_at = now_ms + self.interval_ms;
        true
    }
}

pub struct Debounce {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn call(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    pub fn fire_due(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_fires_immediately_then_swallows_the_burst() {
        let mut throttle = Throttle::new(100.0);

        assert!(throttle.try_fire(0.0));
        assert!(!throttle.try_fire(30.0));
        assert!(!throttle.try_fire(60.0));
        assert!(throttle.try_fire(150.0));
    }

    #[test]
    fn throttle_reopens_relative_to_the_last_fire() {
        let mut throttle = Throttle::new(100.0);

        assert!(throttle.try_fire(150.0));
        assert!(!throttle.try_fire(249.0));
        assert!(throttle.try_fire(250.0));
    }

    #[test]
    fn debounce_fires_once_after_the_quiet_period() {
        let mut debounce = Debounce::new(100.0);

        debounce.call(0.0);
        debounce.call(40.0);
        debounce.call(80.0);

        assert!(!debounce.fire_due(100.0));
        assert!(!debounce.fire_due(179.0));
        assert!(debounce.fire_due(180.0));
        assert!(!debounce.fire_due(300.0));
    }

    #[test]
    fn debounce_is_idle_until_called() {
        let mut debounce = Debounce::new(100.0);

        assert!(!debounce.pending());
        assert!(!debounce.fire_due(1_000.0));

        debounce.call(1_000.0);
        assert!(debounce.pending());
        assert!(debounce.fire_due(1_100.0));
        assert!(!debounce.pending());
    }
}
