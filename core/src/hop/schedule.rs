/// Cyclic channel state machine over a fixed inclusive range.
///
/// Owned solely by the hopper; nothing else mutates the active channel.
#[derive(Debug, Clone)]
pub struct ChannelSchedule {
    min: u8,
    max: u8,
    current: u8,
}

impl ChannelSchedule {
    pub fn new(min: u8, max: u8) -> Self {
        debug_assert!(min >= 1 && min <= max);
        Self {
            min,
            max,
            current: min,
        }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn span(&self) -> u8 {
        self.max - self.min + 1
    }

    /// Steps to the next channel, wrapping to the first after the last.
    pub fn advance(&mut self) -> u8 {
        self.current = (self.current - self.min + 1) % self.span() + self.min;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_minimum() {
        let mut schedule = ChannelSchedule::new(1, 11);
        assert_eq!(schedule.current(), 1);
        for _ in 0..schedule.span() {
            schedule.advance();
        }
        assert_eq!(schedule.current(), 1);
    }

    #[test]
    fn advance_wraps_after_last_channel() {
        let mut schedule = ChannelSchedule::new(3, 5);
        assert_eq!(schedule.advance(), 4);
        assert_eq!(schedule.advance(), 5);
        assert_eq!(schedule.advance(), 3);
    }

    #[test]
    fn single_channel_range_stays_put() {
        let mut schedule = ChannelSchedule::new(7, 7);
        assert_eq!(schedule.advance(), 7);
        assert_eq!(schedule.advance(), 7);
    }
}
