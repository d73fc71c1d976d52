pub(crate) trait StringExt {
    fn trim_in_place(&mut self);
}

impl StringExt for String {
    fn trim_in_place(&mut self) {
        self.truncate(self.trim_end().len());

        let start = self.len() - self.trim_start().len();
        if start > 0 {
            self.drain(..start);
        }
    }
}

pub(crate) trait StrExt {
    fn ends_with_ignore_case(&self, end: &str) -> bool;
}

impl StrExt for str {
    fn ends_with_ignore_case(&self, end: &str) -> bool {
        self.len() >= end.len()
            && self.is_char_boundary(self.len() - end.len())
            && self[self.len() - end.len()..].eq_ignore_ascii_case(end)
    }
}
