pub mod pinned;
