mod app_router;
mod dom;
mod input;
mod yew_app;

fn main() {
    console_error_panic_hook::set_once();
    let config = app_router::load_init_config();
    gloo::console::log!(format!(
        "bingo: {} board(s), {} drag, edit {}, seed {:#x}",
        config.boards,
        config.interaction.label(),
        if config.edit_mode { "on" } else { "off" },
        config.seed
    ));
    yew_app::run(config);
}
