use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{write_config, NotelockConfig};
use crate::errors::CliError;
use crate::ui::{badge, hint, print, Badge};

pub fn handle_init(app: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = app.ui_context();
    let config_path = app.config_path()?;

    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ))
        .into());
    }

    write_config(&config_path, &NotelockConfig::default())?;
    tracing::info!(path = %config_path.display(), "wrote default config");

    if !app.quiet() {
        print(
            &ui,
            &badge(
                &ui,
                Badge::Ok,
                &format!("Wrote config to {}", config_path.display()),
            ),
        );
        print(
            &ui,
            &hint(&ui, "Set [editor] command to choose the editor for `edit`."),
        );
    }
    Ok(())
}
