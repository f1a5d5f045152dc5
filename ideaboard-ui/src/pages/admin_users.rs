use crate::components::{ErrorDisplay, LoadingSpinner};
use crate::{AuthState, NoticeState};
use ideaboard_app::application::Notice;
use ideaboard_app::domain::{Role, User};
use ideaboard_app::ClientContext;
use ideaboard_errors::AppError;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// User listing with role changes. Only rendered for admins.
#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let auth = expect_context::<AuthState>();

    let version = RwSignal::new(0u32);
    let users = LocalResource::new(move || {
        version.track();
        let is_admin = auth.is_admin();
        let manage = ctx.users();
        async move {
            if !is_admin {
                return Err(AppError::Forbidden);
            }
            manage.list().await
        }
    });
    let reload = Callback::new(move |_: ()| version.update(|v| *v += 1));

    view! {
        <h1 class="page__title">"Users"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner label="Loading users..."/> }>
            {move || {
                users.get().map(|result| match result {
                    Ok(users) => view! {
                        <ul class="users">
                            {users
                                .into_iter()
                                .map(|user| view! { <UserRow user=user on_changed=reload/> })
                                .collect_view()}
                        </ul>
                    }
                    .into_any(),
                    Err(AppError::Forbidden) | Err(AppError::Unauthorized) => view! {
                        <p class="page__hint">"Only admins can manage users."</p>
                    }
                    .into_any(),
                    Err(e) => view! {
                        <ErrorDisplay message=e.user_message().to_string() on_retry=reload/>
                    }
                    .into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn UserRow(user: User, on_changed: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let notices = expect_context::<NoticeState>();

    let next_role = if user.is_admin() { Role::User } else { Role::Admin };
    let label = match next_role {
        Role::Admin => "Make admin",
        Role::User => "Make user",
    };
    let busy = RwSignal::new(false);

    let on_click = {
        let user_id = user.id.clone();
        move |_| {
            let users = ctx.users();
            let user_id = user_id.clone();
            busy.set(true);
            spawn_local(async move {
                match users.update_role(&user_id, next_role).await {
                    Ok(message) => {
                        notices.show(Notice::success(message));
                        on_changed.run(());
                    }
                    Err(e) => notices.show(Notice::from(&e)),
                }
                busy.try_set(false);
            });
        }
    };

    view! {
        <li class="user-row">
            <span class="user-row__avatar">{user.initials()}</span>
            <span class="user-row__name">{user.username.clone()}</span>
            <span class="user-row__role">{user.role.as_str()}</span>
            <button class="user-row__toggle" prop:disabled=move || busy.get() on:click=on_click>
                {label}
            </button>
        </li>
    }
}
