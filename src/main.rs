mod app_router;
mod app_runtime;
mod carousel_runtime;
mod input;
mod reveal_view;
mod yew_app;

fn main() {
    console_error_panic_hook::set_once();
    app_runtime::set_page_config(app_router::load_page_config());
    yew_app::run();
}
