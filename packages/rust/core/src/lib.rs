//! Index building core: scan → extract → render → write.
//!
//! [`pipeline`] orchestrates one full index regeneration;
//! [`render`] turns grouped entries into the final HTML document.

pub mod pipeline;
pub mod render;
