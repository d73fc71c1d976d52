use crate::parser::{ParserResult, unparsable};
use crate::render::entities::EntityTable;
use crate::util::str::StringExt;
use quick_xml::NsReader;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};
use std::str;

pub(crate) type ByteReader<'a> = NsReader<&'a [u8]>;

pub(crate) fn reader(data: &[u8]) -> ByteReader<'_> {
    let mut reader = NsReader::from_reader(data);
    reader.config_mut().trim_text(false);
    reader
}

pub(crate) trait XmlReader<'a> {
    /// Iterator-like method to read the next [`Event`].
    fn next(&mut self) -> Option<ParserResult<Event<'a>>>;

    /// Retrieve the consolidated, trimmed text of `start` up to its end tag,
    /// including the text of nested elements.
    ///
    /// The end tag of `start` is consumed.
    fn get_element_text(
        &mut self,
        start: &BytesStart<'_>,
        entities: &EntityTable,
    ) -> ParserResult<String> {
        let mut value = String::new();
        let mut depth = 0_usize;

        while let Some(result) = self.next() {
            match result? {
                Event::Start(_) => depth += 1,
                Event::End(el) if depth == 0 && el.name() == start.name() => break,
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Text(text) => value.push_str(&decode_text(&text, entities)?),
                Event::CData(cdata) => value.push_str(str::from_utf8(&cdata).map_err(unparsable)?),
                Event::GeneralRef(reference) => {
                    value.push_str(&resolve_reference(&reference, entities)?);
                }
                _ => {}
            }
        }
        value.trim_in_place();
        Ok(value)
    }
}

impl<'a> XmlReader<'a> for ByteReader<'a> {
    fn next(&mut self) -> Option<ParserResult<Event<'a>>> {
        match self.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result.map_err(unparsable)),
        }
    }
}

pub(crate) trait XmlElement {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool;

    /// Returns the unescaped value of the attribute named `key` (matched on the qualified name).
    fn get_attribute(
        &self,
        key: impl AsRef<[u8]>,
        entities: &EntityTable,
    ) -> ParserResult<Option<String>>;
}

impl XmlElement for BytesStart<'_> {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool {
        self.local_name().as_ref() == local_name.as_ref()
    }

    fn get_attribute(
        &self,
        key: impl AsRef<[u8]>,
        entities: &EntityTable,
    ) -> ParserResult<Option<String>> {
        match self.try_get_attribute(key).map_err(unparsable)? {
            Some(attribute) => decode_raw(&attribute.value, entities).map(Some),
            None => Ok(None),
        }
    }
}

/// Decodes a text node, resolving any entity references left within it.
pub(crate) fn decode_text(text: &BytesText<'_>, entities: &EntityTable) -> ParserResult<String> {
    decode_raw(text, entities)
}

/// Resolves a general entity or character reference (`&name;`, `&#160;`).
pub(crate) fn resolve_reference(
    reference: &BytesRef<'_>,
    entities: &EntityTable,
) -> ParserResult<String> {
    let name = str::from_utf8(reference).map_err(unparsable)?;

    entities
        .resolve(name)
        .map(|resolved| resolved.into_owned())
        .ok_or_else(|| unparsable(UnknownEntity(name.to_owned())))
}

fn decode_raw(raw: &[u8], entities: &EntityTable) -> ParserResult<String> {
    let raw = str::from_utf8(raw).map_err(unparsable)?;

    entities
        .unescape(raw)
        .map(|unescaped| unescaped.into_owned())
        .map_err(unparsable)
}

#[derive(thiserror::Error, Debug)]
#[error("Unknown entity reference: `&{0};`")]
pub(crate) struct UnknownEntity(pub(crate) String);
