use leptos::prelude::*;

const RADIUS: f64 = 30.0;

/// Colour band of a 0..=100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Warning,
    Critical,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::Good
        } else if score >= 50 {
            ScoreBand::Warning
        } else {
            ScoreBand::Critical
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ScoreBand::Good => "score-good",
            ScoreBand::Warning => "score-warning",
            ScoreBand::Critical => "score-critical",
        }
    }
}

#[component]
pub fn ScoreCircle(score: u8) -> impl IntoView {
    let circumference = 2.0 * std::f64::consts::PI * RADIUS;
    let offset = circumference - f64::from(score.min(100)) / 100.0 * circumference;
    let band = ScoreBand::of(score).class();

    view! {
        <div class="score-circle">
            <svg viewBox="0 0 80 80">
                <circle cx="40" cy="40" r="30" class="score-track" />
                <circle
                    cx="40"
                    cy="40"
                    r="30"
                    class=format!("score-arc {}", band)
                    stroke-dasharray=circumference.to_string()
                    stroke-dashoffset=offset.to_string()
                />
            </svg>
            <span class=format!("score-value {}", band)>{score}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::of(100), ScoreBand::Good);
        assert_eq!(ScoreBand::of(80), ScoreBand::Good);
        assert_eq!(ScoreBand::of(79), ScoreBand::Warning);
        assert_eq!(ScoreBand::of(50), ScoreBand::Warning);
        assert_eq!(ScoreBand::of(49), ScoreBand::Critical);
        assert_eq!(ScoreBand::of(0), ScoreBand::Critical);
    }
}
