//! Repository layer: one zero-sized struct of async query functions per table.

pub mod tutorial_repo;

pub use tutorial_repo::TutorialRepo;
