use serde::{Deserialize, Serialize};

/// Rounded share of correct answers, 0 when nothing was answered. Never
/// exceeds 100 even if `correct > total`.
pub fn calculate_percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let percentage = (f64::from(correct) / f64::from(total) * 100.0).round() as u32;
    percentage.min(100)
}

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackLevel {
    Excellent,
    Great,
    Good,
    KeepTrying,
}

impl FeedbackLevel {
    pub fn emoji(self) -> &'static str {
        match self {
            FeedbackLevel::Excellent => "🎉",
            FeedbackLevel::Great => "😊",
            FeedbackLevel::Good => "💪",
            FeedbackLevel::KeepTrying => "🌱",
        }
    }
}

pub fn classify_feedback(percentage: u32) -> FeedbackLevel {
    match percentage {
        90.. => FeedbackLevel::Excellent,
        70..=89 => FeedbackLevel::Great,
        50..=69 => FeedbackLevel::Good,
        _ => FeedbackLevel::KeepTrying,
    }
}

pub fn feedback_emoji(percentage: u32) -> &'static str {
    classify_feedback(percentage).emoji()
}
