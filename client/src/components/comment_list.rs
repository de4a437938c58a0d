//! Read-only list of course comments.

use leptos::prelude::*;

use crate::net::types::Comment;

#[component]
pub fn CommentList(#[prop(into)] comments: Signal<Vec<Comment>>) -> impl IntoView {
    view! {
        <Show
            when=move || !comments.with(Vec::is_empty)
            fallback=|| view! { <p class="comment-list__empty">"Nenhum comentário ainda. Seja o primeiro!"</p> }
        >
            <ul class="comment-list">
                {move || {
                    comments
                        .get()
                        .into_iter()
                        .map(|c| {
                            let author = c.author.clone().unwrap_or_else(|| "Anônimo".to_owned());
                            let when = c.created_at.clone().unwrap_or_default();
                            view! {
                                <li class="comment-list__item">
                                    <p class="comment-list__meta">
                                        <strong>{author}</strong>
                                        " "
                                        <span class="comment-list__date">{when}</span>
                                    </p>
                                    <p class="comment-list__text">{c.text}</p>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </Show>
    }
}
