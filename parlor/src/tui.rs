pub type Tui = ratatui::DefaultTerminal;

pub fn init() -> color_eyre::Result<Tui> {
    Ok(ratatui::try_init()?)
}

pub fn restore() -> color_eyre::Result<()> {
    ratatui::try_restore()?;
    Ok(())
}
