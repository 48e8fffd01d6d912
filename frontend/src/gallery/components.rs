use crate::gallery::video_card::VideoCard;
use crate::models::{Pagination, VideoSummary};
use crate::utils::rank_offset;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub error_message: Option<String>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    if let Some(msg) = &props.error_message {
        html! {
            <div class="rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-red-800 text-sm mb-4">
                <p class="font-semibold">{ msg }</p>
                <p class="mt-1">
                    {"Check that "}
                    <code class="rounded bg-red-100 px-1">{"YOUTUBE_API_KEY"}</code>
                    {" is set for the backend and the YouTube Data API is enabled."}
                </p>
            </div>
        }
    } else {
        html! {}
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoGridProps {
    pub videos: Vec<VideoSummary>,
    pub pagination: Option<Pagination>,
    pub loading: bool,
}

#[function_component(VideoGrid)]
pub fn video_grid(props: &VideoGridProps) -> Html {
    if props.loading && props.videos.is_empty() {
        return html! {
            <p class="text-center text-gray-500">{"Loading videos..."}</p>
        };
    }

    if props.videos.is_empty() {
        return html! {
            <p class="text-center text-gray-500">{"No videos to show."}</p>
        };
    }

    let offset = props
        .pagination
        .as_ref()
        .map(|p| rank_offset(p, props.videos.len()))
        .unwrap_or(0);

    html! {
        <ul class="grid gap-6 sm:grid-cols-2">
            { for props.videos.iter().enumerate().map(|(index, video)| html! {
                <VideoCard
                    key={video.id.clone()}
                    video={video.clone()}
                    rank={Some(offset + index + 1)}
                />
            })}
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct PaginationControlsProps {
    pub pagination: Pagination,
    pub loading: bool,
    pub on_page_change: Callback<usize>,
}

#[function_component(PaginationControls)]
pub fn pagination_controls(props: &PaginationControlsProps) -> Html {
    let pagination = props.pagination;

    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_page_change.emit(pagination.page.saturating_sub(1).max(1))
        })
    };

    let on_next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| on_page_change.emit(pagination.page + 1))
    };

    html! {
        <div class="mt-8 flex items-center justify-center gap-2">
            <button
                onclick={on_previous}
                disabled={!pagination.has_prev_page || props.loading}
                class="px-4 py-2 text-sm bg-red-600 text-white rounded hover:bg-red-700 disabled:opacity-50"
            >
                {"Previous"}
            </button>
            <span class="px-4 py-2 text-sm text-gray-600">
                {format!("Page {} of {}", pagination.page, pagination.total_pages)}
            </span>
            <button
                onclick={on_next}
                disabled={!pagination.has_next_page || props.loading}
                class="px-4 py-2 text-sm bg-red-600 text-white rounded hover:bg-red-700 disabled:opacity-50"
            >
                {"Next"}
            </button>
        </div>
    }
}
