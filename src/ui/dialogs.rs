use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Ask a yes/no question. Anything but an explicit "Yes" counts as no.
pub fn confirm(title: &str, question: &str) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(question)
        .set_buttons(MessageButtons::YesNo)
        .show();

    matches!(answer, MessageDialogResult::Yes)
}

pub fn show_error(text: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(text)
        .set_buttons(MessageButtons::Ok)
        .show();
}
