use crate::gallery::hover_preview::{HoverEvent, HoverPreview, HOVER_DELAY_MS};
use crate::models::VideoSummary;
use crate::utils::{embed_url, format_iso8601_date, format_view_count, watch_url};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: VideoSummary,
    #[prop_or_default]
    pub rank: Option<usize>,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let preview = use_reducer(HoverPreview::default);
    // Dropping the Timeout cancels it.
    let hover_timer = use_mut_ref(|| None::<Timeout>);

    let on_mouse_enter = {
        let preview = preview.clone();
        let hover_timer = hover_timer.clone();
        Callback::from(move |_: MouseEvent| {
            preview.dispatch(HoverEvent::Enter);
            let preview = preview.clone();
            let timeout = Timeout::new(HOVER_DELAY_MS, move || {
                preview.dispatch(HoverEvent::TimerFired);
            });
            *hover_timer.borrow_mut() = Some(timeout);
        })
    };

    let on_mouse_leave = {
        let preview = preview.clone();
        let hover_timer = hover_timer.clone();
        Callback::from(move |_: MouseEvent| {
            hover_timer.borrow_mut().take();
            preview.dispatch(HoverEvent::Leave);
        })
    };

    let video = &props.video;
    let title = video.title.clone().unwrap_or_else(|| "Untitled".to_string());

    let thumbnail = match &video.thumbnail_url {
        Some(url) => html! {
            <>
                <img
                    src={url.clone()}
                    alt={video.title.clone().unwrap_or_else(|| "Video".to_string())}
                    class="h-full w-full object-cover transition-transform duration-300 group-hover:scale-[1.03]"
                />
                {
                    if preview.is_showing() {
                        html! {
                            <div class="absolute inset-0 z-10 bg-black/5">
                                <iframe
                                    src={embed_url(&video.id)}
                                    title={video.title.clone().unwrap_or_else(|| "Video preview".to_string())}
                                    class="h-full w-full"
                                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                                    allowfullscreen=true
                                />
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </>
        },
        None => html! {
            <div class="flex h-full min-h-[140px] items-center justify-center text-gray-400 text-sm">
                {"No thumbnail"}
            </div>
        },
    };

    html! {
        <li>
            <a
                href={watch_url(&video.id)}
                target="_blank"
                rel="noopener noreferrer"
                class="group block overflow-hidden rounded-2xl border border-gray-200 bg-white shadow-sm transition-all duration-300 hover:border-gray-300 hover:shadow-md"
                onmouseenter={on_mouse_enter}
                onmouseleave={on_mouse_leave}
            >
                <div class="relative aspect-video w-full overflow-hidden bg-gray-200">
                    { thumbnail }
                    {
                        if let Some(rank) = props.rank {
                            html! {
                                <span class="absolute left-2 top-2 z-20 rounded-md bg-black/70 px-2 py-0.5 text-xs font-semibold text-white">
                                    {format!("#{rank}")}
                                </span>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
                <div class="p-4">
                    <h2 class="font-semibold text-gray-900 line-clamp-2 transition-colors duration-200 group-hover:text-red-600">
                        { title }
                    </h2>
                    <p class="mt-1 text-sm text-gray-500">
                        { video.channel_title.clone().unwrap_or_else(|| "Unknown channel".to_string()) }
                    </p>
                    <div class="mt-2 flex flex-wrap gap-x-4 text-xs text-gray-500">
                        { for video.view_count.iter().filter(|c| !c.is_empty()).map(|c| html! {
                            <span>{format!("{} views", format_view_count(c))}</span>
                        })}
                        { for video.like_count.iter().filter(|c| !c.is_empty()).map(|c| html! {
                            <span>{format!("{} likes", format_view_count(c))}</span>
                        })}
                    </div>
                    { for video.published_at.iter().map(|date| html! {
                        <p class="mt-1 text-xs text-gray-500">{format_iso8601_date(date)}</p>
                    })}
                </div>
            </a>
        </li>
    }
}
