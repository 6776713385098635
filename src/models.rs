use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub author: String,
    pub message: String,
    /// `DD-MM`, already formatted when cached.
    pub date: String,
    pub tree_sha: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisesPerDate {
    pub date: String,
    pub exercises: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedDashboard {
    pub done_amount: u32,
    pub review_amount: f64,
    pub commits: Vec<Commit>,
    pub exercises_per_date: Vec<ExercisesPerDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Done,
    Review,
    Left,
    Goal,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [StatKind::Done, StatKind::Review, StatKind::Left, StatKind::Goal];

    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Done => "done",
            StatKind::Review => "review",
            StatKind::Left => "left",
            StatKind::Goal => "goal",
        }
    }

    pub fn color_key(self) -> &'static str {
        match self {
            StatKind::Done => "green",
            StatKind::Review => "grey",
            StatKind::Left => "red",
            StatKind::Goal => "dark_grey",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSlice {
    pub kind: StatKind,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct ColorRequest {
    pub key: String,
    pub hue: f64,
}
