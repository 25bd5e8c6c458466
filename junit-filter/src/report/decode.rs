use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::report::errors::DecodeError;
use crate::report::{
    Case, ReportDocument, SkipState, Suite, FAILURE, NAME, SKIPPED, SYSTEM_OUT, TEST_CASE,
    TEST_SUITE, TEST_SUITES, TIME,
};

type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Decodes the contents of a JUnit XML file.
///
/// The root must be `<testsuites>`. Elements and attributes outside the model
/// are skipped.
pub fn decode_report(content: &str) -> DecodeResult<ReportDocument> {
    let mut reader = Reader::from_str(content);
    reader.expand_empty_elements(true);
    let mut events = Events { reader };

    loop {
        match events.next()? {
            Event::Start(root) if is(&root, TEST_SUITES) => return events.suites(),
            Event::Start(root) => return Err(DecodeError::UnexpectedRoot(element_name(&root))),
            Event::Eof => return Err(DecodeError::MissingRoot),
            _ => {}
        }
    }
}

struct Events<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Events<'a> {
    fn next(&mut self) -> DecodeResult<Event<'a>> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(source) => Err(self.xml_error(source)),
        }
    }

    fn xml_error(&self, source: quick_xml::Error) -> DecodeError {
        DecodeError::Xml {
            position: self.reader.buffer_position(),
            source,
        }
    }

    fn suites(&mut self) -> DecodeResult<ReportDocument> {
        let mut suites = vec![];
        loop {
            match self.next()? {
                Event::Start(start) if is(&start, TEST_SUITE) => suites.push(self.suite(&start)?),
                Event::Start(start) => self.skip(&start)?,
                Event::End(_) => return Ok(ReportDocument { suites }),
                Event::Eof => return Err(DecodeError::UnexpectedEof(TEST_SUITES.to_string())),
                _ => {}
            }
        }
    }

    fn suite(&mut self, start: &BytesStart<'_>) -> DecodeResult<Suite> {
        let name = self.attribute(start, NAME)?;
        let mut cases = vec![];
        loop {
            match self.next()? {
                Event::Start(child) if is(&child, TEST_CASE) => cases.push(self.case(&child)?),
                Event::Start(child) => self.skip(&child)?,
                Event::End(_) => return Ok(Suite { name, cases }),
                Event::Eof => return Err(DecodeError::UnexpectedEof(TEST_SUITE.to_string())),
                _ => {}
            }
        }
    }

    fn case(&mut self, start: &BytesStart<'_>) -> DecodeResult<Case> {
        let mut case = Case {
            name: self.attribute(start, NAME)?.unwrap_or_default(),
            elapsed: self.attribute(start, TIME)?.unwrap_or_default(),
            ..Default::default()
        };

        loop {
            match self.next()? {
                Event::Start(child) if is(&child, SYSTEM_OUT) => {
                    case.stdout = Some(self.text(SYSTEM_OUT)?);
                }
                Event::Start(child) if is(&child, FAILURE) => {
                    case.failure = Some(self.text(FAILURE)?);
                }
                Event::Start(child) if is(&child, SKIPPED) => {
                    case.skip = SkipState::from_text(self.text(SKIPPED)?);
                }
                Event::Start(child) => self.skip(&child)?,
                Event::End(_) => return Ok(case),
                Event::Eof => return Err(DecodeError::UnexpectedEof(TEST_CASE.to_string())),
                _ => {}
            }
        }
    }

    // Character data directly inside the current element. Text of nested
    // elements is not part of it.
    fn text(&mut self, element: &str) -> DecodeResult<String> {
        let mut text = String::new();
        loop {
            match self.next()? {
                Event::Text(chunk) => {
                    let unescaped = chunk.unescape().map_err(|e| self.xml_error(e))?;
                    text.push_str(&unescaped);
                }
                Event::CData(chunk) => text.push_str(&String::from_utf8_lossy(&chunk.into_inner())),
                Event::Start(child) => self.skip(&child)?,
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(DecodeError::UnexpectedEof(element.to_string())),
                _ => {}
            }
        }
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> DecodeResult<()> {
        let mut depth = 0_usize;
        loop {
            match self.next()? {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(DecodeError::UnexpectedEof(element_name(start))),
                _ => {}
            }
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, key: &str) -> DecodeResult<Option<String>> {
        for attribute in start.attributes() {
            let attribute =
                attribute.map_err(|e| self.xml_error(quick_xml::Error::InvalidAttr(e)))?;
            if attribute.key.as_ref() == key.as_bytes() {
                let value = attribute.unescape_value().map_err(|e| self.xml_error(e))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }
}

fn is(start: &BytesStart<'_>, name: &str) -> bool {
    start.name().as_ref() == name.as_bytes()
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}
