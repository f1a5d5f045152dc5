use axum::Router;
use ideaboard_app::{ClientConfig, ClientContext};
use ideaboard_ui::App;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, LeptosRoutes};
use tower_http::compression::CompressionLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    // The same configuration is read again while rendering; reject a bad API URL up front.
    let client_config = ClientConfig::from_env();
    if let Err(e) = ClientContext::in_memory(&client_config) {
        tracing::error!("Invalid client configuration: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Ideas API at {}", client_config.api_base_url);

    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

const CSS: &str = r#"
:root {
    --base: #faf4ed;
    --surface: #fffaf3;
    --overlay: #f2e9e1;
    --muted: #9893a5;
    --subtle: #797593;
    --text: #575279;
    --love: #b4637a;
    --gold: #ea9d34;
    --pine: #286983;
    --foam: #56949f;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', -apple-system, sans-serif;
    background: var(--base);
    color: var(--text);
    min-height: 100vh;
}
button { font: inherit; cursor: pointer; }
button:disabled { cursor: not-allowed; opacity: 0.6; }
.container { max-width: 800px; margin: 0 auto; padding: 1.5rem; }
.topbar {
    display: flex; justify-content: space-between; align-items: center;
    padding: 0.75rem 1.5rem; border-bottom: 2px solid var(--overlay); background: var(--surface);
}
.topbar__nav a { margin-right: 1rem; color: var(--pine); font-weight: 600; text-decoration: none; }
.topbar__nav a[aria-current="page"] { color: var(--love); }
.hero { text-align: center; padding: 2rem 0 1.5rem; }
.hero__title { font-size: clamp(2rem, 5vw, 3rem); color: var(--love); font-weight: 800; margin-bottom: 0.5rem; }
.hero__subtitle { color: var(--subtle); font-size: 1.1rem; }
.auth-form { display: flex; flex-wrap: wrap; gap: 0.5rem; align-items: center; }
.auth-form__input, .idea-card__input, .search__input {
    padding: 0.5rem 0.75rem; border: 2px solid var(--overlay);
    border-radius: 6px; background: var(--surface); color: var(--text);
}
.auth-form__button, .idea-form__button {
    padding: 0.5rem 1rem; background: var(--pine); color: var(--base); border: none; border-radius: 6px; font-weight: 600;
}
.auth-form__toggle, .user-info__logout { background: none; border: none; color: var(--subtle); text-decoration: underline; }
.user-info { display: flex; gap: 0.75rem; align-items: center; }
.user-info__name { font-weight: 600; }
.user-info__badge { font-size: 0.75rem; padding: 0.1rem 0.4rem; border-radius: 4px; background: var(--gold); color: var(--base); }
.notice { display: flex; justify-content: space-between; padding: 0.75rem 1.5rem; }
.notice--success { background: #e3f1ec; color: var(--pine); }
.notice--info { background: #e6f0f3; color: var(--foam); }
.notice--error { background: #fce8ec; color: var(--love); }
.notice__close { background: none; border: none; font-size: 1.2rem; color: inherit; }
.idea-form { display: flex; flex-direction: column; gap: 0.75rem; margin: 1.5rem 0; }
.idea-form__input {
    min-height: 4rem; padding: 0.75rem 1rem; border: 2px solid var(--overlay);
    border-radius: 8px; background: var(--surface); color: var(--text); font: inherit;
}
.search__input { width: 100%; margin: 1rem 0; }
.section__title, .page__title { color: var(--pine); margin: 1.5rem 0 0.75rem; }
.ideas { list-style: none; display: flex; flex-direction: column; gap: 0.75rem; }
.ideas__empty, .page__hint { color: var(--muted); font-style: italic; }
.idea-card {
    display: flex; flex-wrap: wrap; gap: 1rem; align-items: center;
    background: var(--surface); border: 2px solid var(--overlay); border-radius: 10px; padding: 1rem;
}
.idea-card__body { flex: 1; }
.idea-card__title { font-weight: 600; margin-bottom: 0.25rem; }
.idea-card__author { color: var(--subtle); font-size: 0.9rem; }
.idea-card__actions { display: flex; gap: 0.5rem; width: 100%; }
.idea-card__edit, .idea-card__delete { background: none; border: 1px solid var(--overlay); border-radius: 4px; padding: 0.25rem 0.5rem; }
.idea-card__delete { color: var(--love); }
.vote-button {
    display: flex; flex-direction: column; align-items: center; min-width: 4rem;
    padding: 0.5rem; border: 2px solid var(--gold); border-radius: 8px; background: var(--base); color: var(--text);
}
.vote-button--voted { background: var(--gold); color: var(--base); }
.vote-button__count { font-size: 1.2rem; font-weight: 700; }
.vote-button__label { font-size: 0.8rem; }
.idea-card__report { margin-left: 0.75rem; font-size: 0.85rem; color: var(--foam); }
.users { list-style: none; display: flex; flex-direction: column; gap: 0.5rem; }
.user-row {
    display: flex; gap: 0.75rem; align-items: center;
    background: var(--surface); border: 2px solid var(--overlay); border-radius: 8px; padding: 0.5rem 0.75rem;
}
.user-row__avatar {
    width: 2rem; height: 2rem; border-radius: 50%; background: var(--foam); color: var(--base);
    display: flex; align-items: center; justify-content: center; font-weight: 700; font-size: 0.8rem;
}
.user-row__name { flex: 1; font-weight: 600; }
.user-row__role { color: var(--subtle); font-size: 0.85rem; }
.user-row__toggle { background: none; border: 1px solid var(--pine); color: var(--pine); border-radius: 4px; padding: 0.25rem 0.5rem; }
.report__voters { list-style: disc; padding-left: 1.5rem; }
.stats { display: grid; grid-template-columns: auto 1fr; gap: 0.25rem 1rem; margin-bottom: 1rem; }
.stats dt { color: var(--subtle); }
.stats dd { font-weight: 700; }
.loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
.loading__spinner {
    width: 50px; height: 50px; border: 4px solid var(--overlay);
    border-top-color: var(--gold); border-radius: 50%; animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
.error { background: #fce8ec; border: 2px solid var(--love); border-radius: 8px; padding: 1.25rem; margin: 2rem 0; }
.error__title { color: var(--love); font-weight: 700; margin-bottom: 0.5rem; }
.error__message { color: #8b3d4d; }
.error__retry { margin-top: 1rem; padding: 0.5rem 1rem; background: var(--love); color: var(--base); border: none; border-radius: 4px; }
"#;

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::MetaTags;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>💡</text></svg>"/>
                <style>{CSS}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
