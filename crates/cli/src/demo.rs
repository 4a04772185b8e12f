use engage_protocol::{Comment, Post, UserProfile};
use engage_remote::MemoryStore;

/// Store seeded with enough content to exercise filtering, paging and
/// comment flows without a live server.
pub fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        .with_posts(posts())
        .with_comments(comments())
        .with_users(users())
}

fn post(n: usize, title: &str, slug: &str, category: &str, body: &str) -> Post {
    Post {
        id: format!("p{n}"),
        title: title.to_string(),
        slug: slug.to_string(),
        content: body.repeat(40),
        category: category.to_string(),
        image: String::new(),
        created_at: format!("2024-05-{:02}T09:00:00.000Z", n + 1),
        updated_at: format!("2024-05-{:02}T09:00:00.000Z", n + 1),
    }
}

fn posts() -> Vec<Post> {
    vec![
        post(
            0,
            "Tank deliveries, one year on",
            "tank-deliveries-one-year-on",
            "military-aid",
            "A look back at the armored vehicle pipeline and what reached the front. ",
        ),
        post(
            1,
            "Air defense layering explained",
            "air-defense-layering-explained",
            "military-aid",
            "Short-range, medium-range, strategic: how the layers interlock. ",
        ),
        post(
            2,
            "Command culture under pressure",
            "command-culture-under-pressure",
            "leadership",
            "What delegation looks like when communications degrade. ",
        ),
        post(
            3,
            "Procurement reform, quietly",
            "procurement-reform-quietly",
            "defense-policy",
            "The unglamorous paperwork changes that move deliveries faster. ",
        ),
        post(
            4,
            "Black Sea shipping lanes",
            "black-sea-shipping-lanes",
            "global-security",
            "Grain corridors, insurance premiums and escort patterns. ",
        ),
        post(
            5,
            "Field notes",
            "field-notes",
            "uncategorized",
            "Loose observations that did not fit anywhere else. ",
        ),
    ]
}

fn users() -> Vec<UserProfile> {
    vec![
        UserProfile {
            id: "u1".into(),
            username: "analyst".into(),
            profile_picture: String::new(),
            is_admin: false,
        },
        UserProfile {
            id: "u2".into(),
            username: "editor".into(),
            profile_picture: String::new(),
            is_admin: true,
        },
    ]
}

fn comments() -> Vec<Comment> {
    vec![
        Comment {
            id: "c1".into(),
            post_id: "p0".into(),
            content: "Good analysis.".into(),
            author_id: "u1".into(),
            created_at: "2024-05-02T10:00:00.000Z".into(),
            likes: vec!["u2".into()],
            number_of_likes: 1,
        },
        Comment {
            id: "c2".into(),
            post_id: "p0".into(),
            content: "The delivery figures match what we tracked.".into(),
            author_id: "u2".into(),
            created_at: "2024-05-02T11:30:00.000Z".into(),
            likes: Vec::new(),
            number_of_likes: 0,
        },
    ]
}
