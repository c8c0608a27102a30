//! Console text for the YouTube probes.

use crate::api_client::VideoSummary;

pub fn video_line(index: usize, video: &VideoSummary) -> String {
    format!(
        "{}. [{}] {} (Published: {})",
        index + 1,
        video.video_id,
        video.title,
        video.published_at
    )
}

/// Header line followed by one numbered entry per video.
pub fn video_listing(videos: &[VideoSummary]) -> Vec<String> {
    let mut lines = Vec::with_capacity(videos.len() + 1);
    lines.push(format!("Found {} videos:", videos.len()));
    lines.extend(
        videos
            .iter()
            .enumerate()
            .map(|(i, video)| video_line(i, video)),
    );
    lines
}
