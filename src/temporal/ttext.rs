//! `ttext`: a temporal value over the text base domain. Like `tbool`,
//! `String` is step-only.

use super::dispatch::Temporal;
use super::instant::TInstant;
use super::sequence::TSequence;
use super::sequence_set::TSequenceSet;

pub type TTextInst = TInstant<String>;
pub type TTextSeq = TSequence<String>;
pub type TTextSeqSet = TSequenceSet<String>;
pub type TText = Temporal<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_quoted_text() {
        let text = "\"hello, world\"@2000-01-01T00:00:00+00:00";
        let t = TText::from_wkt(text).unwrap();
        assert_eq!(*t.start_value(), "hello, world");
        assert_eq!(t.as_wkt(), text);
    }
}
