mod rewrite;
mod scan;
mod videos;

pub use rewrite::rewrite;
pub use scan::scan;
pub use videos::videos;
