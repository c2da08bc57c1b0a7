use color_eyre::Result;
use poster_generator::{APP_NAME, Gui, load_config};

pub fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let cfg = load_config()?;
    iced::application(move || Gui::new(cfg.clone()), Gui::update, Gui::view)
        .title(APP_NAME)
        .run()?;
    Ok(())
}
