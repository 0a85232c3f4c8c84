pub mod add_content_modal;
pub mod content_card;
pub mod otp_input;
pub mod pagination;
pub mod toast;
pub mod ui;

pub use add_content_modal::AddContentModal;
pub use content_card::ContentCard;
pub use otp_input::OtpInput;
pub use pagination::Pagination;
pub use toast::Toaster;
