/// 入力欄の状態
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub path: String,
    pub keywords: String,
}

/// メッセージ行の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// 画面の状態
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub form: SearchForm,
    pub selected_row: Option<usize>,
    pub status: String,
    pub searching: bool,
    pub notice: Option<(NoticeLevel, String)>,
}

impl ViewState {
    pub fn select(&mut self, index: usize) {
        self.selected_row = Some(index);
    }

    pub fn clear_selection(&mut self) {
        self.selected_row = None;
    }

    pub fn info(&mut self, title: &str, message: &str) {
        self.notice = Some((NoticeLevel::Info, format!("{}: {}", title, message)));
    }

    pub fn error(&mut self, title: &str, message: &str) {
        self.notice = Some((NoticeLevel::Error, format!("{}: {}", title, message)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        let mut view = ViewState::default();
        view.select(2);
        assert_eq!(view.selected_row, Some(2));
        view.clear_selection();
        assert_eq!(view.selected_row, None);
    }

    #[test]
    fn test_notice() {
        let mut view = ViewState::default();
        view.error("Error", "Please enter keywords");
        assert_eq!(
            view.notice,
            Some((NoticeLevel::Error, "Error: Please enter keywords".to_string()))
        );
        view.info("Success", "saved");
        assert_eq!(view.notice.as_ref().map(|(level, _)| *level), Some(NoticeLevel::Info));
    }
}
