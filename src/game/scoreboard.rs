// Match score and the process-wide high score

use std::sync::atomic::{AtomicU32, Ordering};

use log::info;

/// Best score of any match since the process started
static HIGH_SCORE: AtomicU32 = AtomicU32::new(0);

/// Current high score
pub fn high_score() -> u32 {
    HIGH_SCORE.load(Ordering::Relaxed)
}

/// Shows the score to the player; no acknowledgement is expected
pub trait ScoreDisplay {
    fn set_score(&mut self, score: u32);
}

/// Display that logs score changes
#[derive(Debug, Default)]
pub struct LogDisplay;

impl ScoreDisplay for LogDisplay {
    fn set_score(&mut self, score: u32) {
        info!("Score: {score} (best {})", high_score());
    }
}

/// Score of the running match
pub struct Scoreboard {
    score: u32,
    display: Box<dyn ScoreDisplay>,
}

impl Scoreboard {
    pub fn new(mut display: Box<dyn ScoreDisplay>) -> Self {
        display.set_score(0);
        Self { score: 0, display }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add points; the score never goes down
    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        HIGH_SCORE.fetch_max(self.score, Ordering::Relaxed);
        self.display.set_score(self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Display that remembers everything it was shown
    #[derive(Default, Clone)]
    struct Shown(Rc<RefCell<Vec<u32>>>);

    impl ScoreDisplay for Shown {
        fn set_score(&mut self, score: u32) {
            self.0.borrow_mut().push(score);
        }
    }

    #[test]
    fn test_score_accumulates_and_displays() {
        let shown = Shown::default();
        let mut scoreboard = Scoreboard::new(Box::new(shown.clone()));
        scoreboard.add(10);
        scoreboard.add(30);
        scoreboard.add(60);
        assert_eq!(scoreboard.score(), 100);
        assert_eq!(*shown.0.borrow(), vec![0, 10, 40, 100]);
    }

    #[test]
    fn test_high_score_survives_new_match() {
        let mut first = Scoreboard::new(Box::new(LogDisplay));
        first.add(250);
        let best = high_score();
        assert!(best >= 250);

        let mut second = Scoreboard::new(Box::new(LogDisplay));
        second.add(10);
        assert_eq!(second.score(), 10);
        assert!(high_score() >= best);
    }
}
