pub mod answer;
pub mod submission;
