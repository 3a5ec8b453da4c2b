//! Initial data for local collections that start non-empty.

use chrono::{Duration, Utc};

use safehaven_types::post::{Comment, Post};

/// The two community posts shown when the local post collection is first read.
///
/// Timestamps are relative to the moment of seeding.
pub fn initial_posts() -> Vec<Post> {
    let now = Utc::now();
    vec![
        Post {
            id: "1".to_string(),
            author: "Sarah Jenkins".to_string(),
            content: "Recovery is not a straight line. Some days are harder than others, \
                      but finding a community that understands has been my saving grace. \
                      Remember, you are not alone in this journey."
                .to_string(),
            timestamp: now - Duration::minutes(120),
            likes: 24,
            comments: vec![Comment {
                id: "c1".to_string(),
                author: "Mike T.".to_string(),
                content: "Thank you for sharing this. Needed to hear it today.".to_string(),
                timestamp: now - Duration::minutes(60),
            }],
        },
        Post {
            id: "2".to_string(),
            author: "Anonymous".to_string(),
            content: "Today marks one year since I left my abusive situation. It was the \
                      hardest thing I ever did, but the freedom I feel now is worth every \
                      struggle. To anyone thinking about leaving: You can do it."
                .to_string(),
            timestamp: now - Duration::minutes(300),
            likes: 156,
            comments: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_posts_shape() {
        let posts = initial_posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[0].comments.len(), 1);
        assert_eq!(posts[1].likes, 156);
        assert!(posts[0].timestamp > posts[1].timestamp);
    }
}
