use crate::{AuthState, NoticeState};
use ideaboard_app::application::Notice;
use ideaboard_app::domain::Identity;
use ideaboard_app::infrastructure::session::{AuthEvent, LogoutReason};
use ideaboard_app::ClientContext;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Login/signup form or the signed-in user, kept current by session events.
#[component]
pub fn AuthSection() -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let auth = expect_context::<AuthState>();
    let notices = expect_context::<NoticeState>();

    Effect::new({
        let session = ctx.session.clone();
        move |_| auth.sync(&session)
    });

    let subscription = ctx.session.subscribe(move |event| match event {
        AuthEvent::LoggedIn(identity) => auth.set(Some(identity.clone())),
        AuthEvent::LoggedOut { reason } => {
            auth.set(None);
            if *reason == LogoutReason::SessionExpired {
                notices.show(Notice::info("Your session has expired. Please log in again."));
            }
        }
    });

    let session = ctx.session.clone();
    on_cleanup(move || {
        session.unsubscribe(subscription);
    });

    view! {
        <div class="auth-section">
            {move || match auth.identity() {
                Some(identity) => view! { <SignedIn identity=identity/> }.into_any(),
                None => view! { <LoginForm/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn SignedIn(identity: Identity) -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let notices = expect_context::<NoticeState>();
    let is_admin = identity.is_admin();

    let on_logout = move |_| {
        ctx.authenticate().logout();
        notices.show(Notice::info("You are logged out."));
    };

    view! {
        <div class="user-info">
            <span class="user-info__name">{identity.display_name}</span>
            {is_admin.then(|| view! { <span class="user-info__badge">"admin"</span> })}
            <button class="user-info__logout" on:click=on_logout>"Log out"</button>
        </div>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let ctx = expect_context::<ClientContext>();
    let notices = expect_context::<NoticeState>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let signing_up = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        let authenticate = ctx.authenticate();
        let name = username.get_untracked();
        let secret = password.get_untracked();
        let signup = signing_up.get_untracked();

        spawn_local(async move {
            let notice = if signup {
                match authenticate.signup(&name, &secret).await {
                    Ok(outcome) => match outcome.login_error {
                        None => Notice::success(format!("Welcome, {}!", outcome.account.username)),
                        Some(e) => Notice::info(format!(
                            "Account created, but logging in failed: {}",
                            e.user_message()
                        )),
                    },
                    Err(e) => Notice::from(&e),
                }
            } else {
                match authenticate.login(&name, &secret).await {
                    Ok(identity) => Notice::success(format!("Welcome back, {}!", identity.display_name)),
                    Err(e) => Notice::from(&e),
                }
            };

            password.try_set(String::new());
            busy.try_set(false);
            notices.show(notice);
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <input
                type="text"
                class="auth-form__input"
                placeholder="Username"
                autocomplete="username"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
                required
            />
            <input
                type="password"
                class="auth-form__input"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
                required
            />
            <button type="submit" class="auth-form__button" prop:disabled=move || busy.get()>
                {move || match (busy.get(), signing_up.get()) {
                    (true, _) => "Please wait...",
                    (false, true) => "Sign up",
                    (false, false) => "Log in",
                }}
            </button>
            <button
                type="button"
                class="auth-form__toggle"
                on:click=move |_| signing_up.update(|s| *s = !*s)
            >
                {move || if signing_up.get() { "I already have an account" } else { "Create an account" }}
            </button>
        </form>
    }
}
