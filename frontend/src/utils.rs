use crate::models::Pagination;

pub fn format_iso8601_date(iso_date: &str) -> String {
    if let Ok(datetime) = iso_date.parse::<chrono::DateTime<chrono::Utc>>() {
        datetime.format("%b %-d, %Y").to_string()
    } else {
        String::new()
    }
}

// 1234 -> "1.2K", 5600000 -> "5.6M"
pub fn format_view_count(count: &str) -> String {
    if count.is_empty() {
        return String::new();
    }
    let Ok(number) = count.trim().parse::<f64>() else {
        return count.to_string();
    };

    if number >= 1_000_000_000.0 {
        format!("{:.1}B", number / 1_000_000_000.0)
    } else if number >= 1_000_000.0 {
        format!("{:.1}M", number / 1_000_000.0)
    } else if number >= 1_000.0 {
        format!("{:.1}K", number / 1_000.0)
    } else {
        number.to_string()
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{video_id}?autoplay=1&mute=1&controls=1&rel=0&modestbranding=1"
    )
}

/// Number of videos ranked before the first card of this page.
///
/// Every page but the last is full, so the page size is either the current
/// count or, on the last page, what is left after removing it.
pub fn rank_offset(pagination: &Pagination, count: usize) -> usize {
    if pagination.page <= 1 {
        return 0;
    }
    let per_page = if pagination.has_next_page || pagination.total_pages <= 1 {
        count
    } else {
        pagination.total_count.saturating_sub(count) / (pagination.total_pages - 1)
    };
    (pagination.page - 1) * per_page
}
