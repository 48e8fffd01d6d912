use crate::config::CONFIG;
use crate::gallery::api::load_videos;
use crate::gallery::components::{ErrorBanner, PaginationControls, VideoGrid};
use crate::models::{Pagination, VideoSummary};
use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <GalleryApp /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-50">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{"404 - Page Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-red-600 hover:underline">
                        {"Go back to the gallery"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}

/// `?page=` in the address bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: usize,
}

impl PageQuery {
    /// Missing or non-positive pages mean page 1.
    pub fn page_or_first(query: Option<PageQuery>) -> usize {
        query.map(|q| q.page).filter(|page| *page >= 1).unwrap_or(1)
    }
}

#[function_component(GalleryApp)]
pub fn gallery_app() -> Html {
    let navigator = use_navigator();
    // Follows the router, so Back/Forward land on the right page too
    let current_page = use_location()
        .map(|location| PageQuery::page_or_first(location.query::<PageQuery>().ok()))
        .unwrap_or(1);
    let videos = use_state(Vec::<VideoSummary>::default);
    let pagination = use_state(|| None::<Pagination>);
    let loading = use_state(|| true);
    let error_message = use_state(Option::<String>::default);

    // Refetch whenever the requested page changes
    {
        let videos = videos.clone();
        let pagination = pagination.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();

        use_effect_with(current_page, move |page| {
            let page = *page;
            loading.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                load_videos(page, videos, pagination, error_message, loading).await;
            });
            || ()
        });
    }

    let on_page_change = Callback::from(move |page: usize| {
        if let Some(navigator) = &navigator {
            if let Err(e) = navigator.push_with_query(&Route::Home, &PageQuery { page }) {
                log::warn!("Failed to update page query: {:?}", e);
            }
        }
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    });

    html! {
        <div class="min-h-screen bg-gray-50 font-sans">
            <main class="mx-auto max-w-4xl px-4 py-8 sm:px-6">
                <h1 class="text-2xl font-semibold text-gray-900 mb-1">
                    { CONFIG.app_name.clone() }
                </h1>
                <p class="text-gray-600 text-sm mb-8">
                    {"Sorted by view count · Shorts excluded · Refreshes hourly"}
                </p>

                <ErrorBanner error_message={(*error_message).clone()} />

                {
                    if error_message.is_none() {
                        html! {
                            <>
                                <VideoGrid
                                    videos={(*videos).clone()}
                                    pagination={*pagination}
                                    loading={*loading}
                                />
                                {
                                    match *pagination {
                                        Some(p) if p.total_pages > 1 => html! {
                                            <PaginationControls
                                                pagination={p}
                                                loading={*loading}
                                                on_page_change={on_page_change}
                                            />
                                        },
                                        _ => html! {},
                                    }
                                }
                            </>
                        }
                    } else {
                        html! {}
                    }
                }
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_keeps_positive_pages() {
        assert_eq!(PageQuery::page_or_first(Some(PageQuery { page: 3 })), 3);
    }

    #[test]
    fn page_query_falls_back_to_first_page() {
        assert_eq!(PageQuery::page_or_first(None), 1);
        assert_eq!(PageQuery::page_or_first(Some(PageQuery { page: 0 })), 1);
    }
}
