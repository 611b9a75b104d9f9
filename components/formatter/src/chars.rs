pub trait XmlByteExt {
    fn is_xml_whitespace(&self) -> bool;
    fn is_name_byte(&self) -> bool;
}

impl XmlByteExt for u8 {
    fn is_xml_whitespace(&self) -> bool {
        matches!(*self, b'\t' | b'\n' | b'\r' | b' ')
    }

    /// Byte that may appear in a tag or attribute name. Approximate on
    /// purpose: the tokenizer is fail-soft, not a grammar.
    fn is_name_byte(&self) -> bool {
        self.is_ascii_alphanumeric() || matches!(*self, b'-' | b'_' | b':' | b'.')
    }
}

pub trait XmlStrExt {
    fn only_xml_whitespace(&self) -> bool;
    fn leading_spaces(&self) -> usize;
}

impl XmlStrExt for str {
    fn only_xml_whitespace(&self) -> bool {
        self.bytes().all(|b| b.is_xml_whitespace())
    }

    fn leading_spaces(&self) -> usize {
        self.bytes().take_while(|b| *b == b' ').count()
    }
}
