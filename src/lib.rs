pub mod app;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod state;
pub mod content {
    pub mod metrics;
    pub mod slug;
    pub mod writing_tools;
}
pub mod db {
    pub mod chapter_repository;
    pub mod media_repository;
    pub mod memory;
    pub mod models;
    pub mod repository;
    pub mod section_repository;
    pub mod sequence;
    pub mod snippet_repository;
    pub mod version_repository;
}
pub mod service {
    pub mod documents;
}
pub mod storage {
    pub mod client;
}
pub mod api {
    pub mod blog;
    pub mod chapters;
    pub mod documents;
    pub mod errors;
    pub mod export;
    pub mod extract;
    pub mod media;
    pub mod publishing;
    pub mod snippets;
    pub mod writing_tools;
}
