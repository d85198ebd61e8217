use serde::Serialize;
use std::fmt::Display;

/// Crop health categories. The names double as the per-class directory names
/// on both the raw and the processed side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClassLabel {
    Health,
    Rust,
    Other,
}

impl ClassLabel {
    /// Processing order of the classes.
    pub const ALL: [ClassLabel; 3] = [ClassLabel::Health, ClassLabel::Rust, ClassLabel::Other];

    pub fn dir_name(&self) -> &'static str {
        match self {
            ClassLabel::Health => "Health",
            ClassLabel::Rust => "Rust",
            ClassLabel::Other => "Other",
        }
    }
}

impl Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_names() {
        let names: Vec<&str> = ClassLabel::ALL.iter().map(|c| c.dir_name()).collect();
        assert_eq!(names, vec!["Health", "Rust", "Other"]);
        assert_eq!(ClassLabel::Rust.to_string(), "Rust");
    }
}
