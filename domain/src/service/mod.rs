mod text_source;

pub use self::text_source::TextSource;
