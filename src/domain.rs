mod sender_email;
mod sender_name;

pub use sender_email::SenderEmail;
pub use sender_name::SenderName;
