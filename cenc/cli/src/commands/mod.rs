mod decode;
mod downgrade;
mod encode;

pub use self::decode::DecodeCommand;
pub use self::downgrade::DowngradeCommand;
pub use self::encode::EncodeCommand;
