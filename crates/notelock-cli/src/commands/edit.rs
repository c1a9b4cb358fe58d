use crate::app::{resolve_note_path, AppContext};
use crate::cli::EditArgs;
use crate::session::{EditorSession, PromptPassphrase, SessionOptions, StdinLines};
use crate::ui::{header, hint, print};

pub fn handle_edit(app: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let ui = app.ui_context();
    let interactive = ui.is_interactive();
    let options = SessionOptions {
        quiet: app.quiet(),
        interactive,
        editor: app.editor()?.map(str::to_string),
    };

    let mut session = EditorSession::new(ui.clone(), options, PromptPassphrase { interactive });
    if let Some(value) = args.file.as_deref() {
        let path = resolve_note_path(value)?;
        session = session.with_file(path)?;
    }

    if interactive && !app.quiet() {
        let path = session.path().map(|p| p.display().to_string());
        print(&ui, &header(&ui, "edit", path.as_deref()));
        print(&ui, &hint(&ui, "Type `help` for commands, `quit` to leave."));
    }

    session.run(&mut StdinLines)
}
