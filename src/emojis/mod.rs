/// Codepoint sequences and their canonical form
pub mod sequence;
/// The grades used in `emoji-test.txt`
pub mod emoji_status;
