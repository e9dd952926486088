use crate::domain::Post;

/// Posts whose title or content contains `term`, ignoring case, in input order.
///
/// A blank term matches everything.
pub fn filter_posts(posts: &[Post], term: &str) -> Vec<Post> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.content.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
