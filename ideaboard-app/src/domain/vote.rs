use super::Idea;
use serde::{Deserialize, Serialize};

/// Summary shown above the caller's voted ideas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteStats {
    pub count: usize,
    pub average_votes: i32,
    pub max_votes: i32,
}

impl VoteStats {
    pub fn from_ideas(ideas: &[Idea]) -> Self {
        if ideas.is_empty() {
            return Self::default();
        }

        let total: i64 = ideas.iter().map(|i| i64::from(i.votes)).sum();
        let average = (total as f64 / ideas.len() as f64).round() as i32;
        let max_votes = ideas.iter().map(|i| i.votes).max().unwrap_or(0);

        Self {
            count: ideas.len(),
            average_votes: average,
            max_votes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User};

    #[test]
    fn test_stats() {
        let author = User::new("1", "ana", Role::User);
        let ideas = vec![
            Idea::new("a", "A", 3, author.clone()),
            Idea::new("b", "B", 4, author.clone()),
            Idea::new("c", "C", 10, author),
        ];
        let stats = VoteStats::from_ideas(&ideas);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average_votes, 6);
        assert_eq!(stats.max_votes, 10);
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(VoteStats::from_ideas(&[]), VoteStats::default());
    }
}
