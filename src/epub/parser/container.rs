use crate::epub::consts::{self, bytes};
use crate::epub::errors::{ContainerFault, EpubError};
use crate::epub::parser::EpubParser;
use crate::errors::FormatError;
use crate::parser::xml::{self, XmlElement, XmlReader};
use crate::util::uri;
use quick_xml::events::Event;
use std::error::Error;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package `.opf` file location.
    pub(super) fn parse_container(&self) -> Result<String, EpubError> {
        let data = self
            .archive
            .read_utf8(consts::CONTAINER)
            .map_err(|error| malformed(ContainerFault::MissingDescriptor(error)))?;
        let mut reader = xml::reader(&data);

        while let Some(event) = reader.next() {
            let el = match event.map_err(unparsable_descriptor)? {
                Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::ROOT_FILE) => el,
                _ => continue,
            };
            // Although rare, multiple package locations could exist.
            // Only the first is accepted as it is the default rendition.
            let full_path = el
                .get_attribute(consts::FULL_PATH, &self.options.entities)
                .map_err(unparsable_descriptor)?;

            match full_path.as_deref().map(str::trim) {
                Some(path) if !path.is_empty() => return Ok(uri::resolve("", path)),
                _ => continue,
            }
        }
        Err(malformed(ContainerFault::MissingRootFile))
    }
}

fn malformed(fault: ContainerFault) -> EpubError {
    EpubError::MalformedContainer(fault)
}

fn unparsable_descriptor(error: FormatError) -> EpubError {
    let source: Box<dyn Error + Send + Sync> = match error {
        FormatError::Unparsable(source) => source,
        FormatError::Epub(error) => Box::new(error),
    };
    malformed(ContainerFault::UnparsableDescriptor(source))
}
