//! Demo catalog for local development

use tracing::{info, instrument};
use vidshare_core::{normalize_tags, User, Video};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub const DEMO_PASSWORD: &str = "password123";

struct DemoUser {
    username: &'static str,
    email: &'static str,
    avatar: &'static str,
    subscribers: i64,
}

struct DemoVideo {
    title: &'static str,
    description: &'static str,
    thumbnail_url: &'static str,
    video_url: &'static str,
    views: i64,
    category: &'static str,
    /// Index into `DEMO_USERS`
    uploader: usize,
    tags: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "johndoe",
        email: "john@example.com",
        avatar: "https://randomuser.me/api/portraits/men/1.jpg",
        subscribers: 1_250_000,
    },
    DemoUser {
        username: "janedoe",
        email: "jane@example.com",
        avatar: "https://randomuser.me/api/portraits/women/1.jpg",
        subscribers: 840_000,
    },
    DemoUser {
        username: "techguru",
        email: "tech@example.com",
        avatar: "https://randomuser.me/api/portraits/men/2.jpg",
        subscribers: 2_450_000,
    },
];

const SAMPLE_BUCKET: &str = "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample";

const DEMO_VIDEOS: &[DemoVideo] = &[
    DemoVideo {
        title: "Getting Started with React",
        description: "Learn the basics of React in this comprehensive tutorial for beginners. We'll cover components, props, state, and more!",
        thumbnail_url: "https://images.pexels.com/photos/11035471/pexels-photo-11035471.jpeg",
        video_url: "BigBuckBunny.mp4",
        views: 254_789,
        category: "tech",
        uploader: 0,
        tags: &["react", "javascript", "tutorial"],
    },
    DemoVideo {
        title: "Top 10 Programming Languages in 2024",
        description: "Discover the most in-demand programming languages for 2024. We analyze job trends, salary data, and developer surveys to bring you the definitive list.",
        thumbnail_url: "https://images.pexels.com/photos/574071/pexels-photo-574071.jpeg",
        video_url: "ElephantsDream.mp4",
        views: 189_456,
        category: "tech",
        uploader: 2,
        tags: &["programming", "career", "technology"],
    },
    DemoVideo {
        title: "Morning Yoga Routine for Beginners",
        description: "Start your day with this 15-minute yoga routine perfect for beginners. Improve flexibility, reduce stress, and boost your energy levels.",
        thumbnail_url: "https://images.pexels.com/photos/3822906/pexels-photo-3822906.jpeg",
        video_url: "ForBiggerBlazes.mp4",
        views: 352_140,
        category: "fitness",
        uploader: 1,
        tags: &["yoga", "fitness", "wellness"],
    },
    DemoVideo {
        title: "How to Make Perfect Pasta Carbonara",
        description: "Learn the authentic Italian recipe for creamy pasta carbonara. Simple ingredients, amazing results!",
        thumbnail_url: "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg",
        video_url: "ForBiggerEscapes.mp4",
        views: 287_320,
        category: "cooking",
        uploader: 1,
        tags: &["cooking", "italian", "recipe"],
    },
    DemoVideo {
        title: "Building a Full-Stack Application with MERN",
        description: "In this tutorial, we'll build a complete web application using MongoDB, Express, React, and Node.js (MERN stack).",
        thumbnail_url: "https://images.pexels.com/photos/577585/pexels-photo-577585.jpeg",
        video_url: "ForBiggerFun.mp4",
        views: 198_760,
        category: "tech",
        uploader: 2,
        tags: &["mern", "web development", "javascript"],
    },
    DemoVideo {
        title: "Travel Guide: Hidden Gems in Tokyo",
        description: "Discover Tokyo's best-kept secrets and off-the-beaten-path locations that most tourists never find. Local tips and authentic experiences!",
        thumbnail_url: "https://images.pexels.com/photos/2506923/pexels-photo-2506923.jpeg",
        video_url: "ForBiggerJoyrides.mp4",
        views: 325_470,
        category: "travel",
        uploader: 0,
        tags: &["travel", "japan", "tokyo"],
    },
];

/// What a seeding run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub videos: usize,
}

/// Insert demo users and videos unless the catalog already has videos.
///
/// Existing users with a demo email are reused rather than recreated.
#[instrument(skip(ctx))]
pub async fn seed_demo_data(ctx: &ServiceContext) -> ServiceResult<SeedReport> {
    if ctx.video_repo().count().await? > 0 {
        info!("Catalog not empty, skipping demo data");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();
    let password_hash = ctx.password_service().hash(DEMO_PASSWORD)?;

    let mut uploaders = Vec::with_capacity(DEMO_USERS.len());
    for demo in DEMO_USERS {
        let user = match ctx.user_repo().find_by_email(demo.email).await? {
            Some(existing) => existing,
            None => {
                let mut user = User::new(
                    ctx.generate_id(),
                    demo.username.to_string(),
                    demo.email.to_string(),
                );
                user.avatar = demo.avatar.to_string();
                user.subscribers = demo.subscribers;
                ctx.user_repo().create(&user, &password_hash).await?;
                report.users += 1;
                user
            }
        };
        uploaders.push(user);
    }

    for demo in DEMO_VIDEOS {
        let mut video = Video::new(
            ctx.generate_id(),
            uploaders[demo.uploader].id,
            demo.title.to_string(),
            format!("{SAMPLE_BUCKET}/{}", demo.video_url),
        );
        video.description = demo.description.to_string();
        video.thumbnail_url = demo.thumbnail_url.to_string();
        video.category = demo.category.to_string();
        video.tags = normalize_tags(demo.tags.iter().map(|t| (*t).to_string()).collect());
        video.views = demo.views;

        ctx.video_repo().create(&video).await?;
        report.videos += 1;
    }

    info!(users = report.users, videos = report.videos, "Demo data seeded");
    Ok(report)
}
