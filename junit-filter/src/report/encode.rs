use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::report::errors::Error;
use crate::report::{
    Case, Result, SkipState, Suite, FAILURE, NAME, SKIPPED, SYSTEM_OUT, TEST_CASE, TEST_SUITE,
    TIME,
};

const INDENT_SIZE: usize = 2;

/// Encodes `suite` as a standalone JUnit document with a single `<testsuite>`
/// root.
pub fn encode_report(suite: &Suite) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);

    writer.write_event(Event::Decl(decl))?;
    suite.serialize(&mut writer)?;
    writer.write_indent()?;

    Ok(writer.into_inner())
}

/// Encodes `suite` and replaces `destination` with it.
///
/// Encoding happens before the file is touched, so a failed encode leaves an
/// existing destination as it was.
pub fn write_report(suite: &Suite, destination: &Path) -> Result<()> {
    let data = encode_report(suite)?;
    std::fs::write(destination, data).map_err(|source| Error::WriteError {
        path: destination.to_path_buf(),
        source,
    })
}

impl Suite {
    fn serialize(&self, writer: &mut Writer<impl Write>) -> Result<()> {
        let mut suite_tag = BytesStart::new(TEST_SUITE);
        if let Some(name) = &self.name {
            suite_tag.push_attribute((NAME, name.as_str()));
        }

        if self.cases.is_empty() {
            return serialize_empty_event(suite_tag, writer);
        }

        writer.write_event(Event::Start(suite_tag))?;
        for case in &self.cases {
            case.serialize(writer)?;
        }
        serialize_end_event(TEST_SUITE, writer)
    }
}

impl Case {
    fn serialize(&self, writer: &mut Writer<impl Write>) -> Result<()> {
        let mut case_tag = BytesStart::new(TEST_CASE);
        case_tag.extend_attributes([(NAME, self.name.as_str()), (TIME, self.elapsed.as_str())]);

        if !self.has_children() {
            return serialize_empty_event(case_tag, writer);
        }

        writer.write_event(Event::Start(case_tag))?;
        if let Some(stdout) = &self.stdout {
            serialize_text_element(SYSTEM_OUT, stdout, writer)?;
        }
        if let Some(failure) = &self.failure {
            serialize_text_element(FAILURE, failure, writer)?;
        }
        match &self.skip {
            SkipState::Absent => {}
            SkipState::PresentEmpty => serialize_empty_event(BytesStart::new(SKIPPED), writer)?,
            SkipState::PresentWithText(reason) => {
                serialize_text_element(SKIPPED, reason, writer)?
            }
        }
        serialize_end_event(TEST_CASE, writer)
    }
}

fn serialize_text_element(
    title: &str,
    content: &str,
    writer: &mut Writer<impl Write>,
) -> Result<()> {
    if content.is_empty() {
        return serialize_empty_event(BytesStart::new(title), writer);
    }
    writer.write_event(Event::Start(BytesStart::new(title)))?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    serialize_end_event(title, writer)
}

fn serialize_end_event(title: &str, writer: &mut Writer<impl Write>) -> Result<()> {
    let tag = BytesEnd::new(title);
    Ok(writer.write_event(Event::End(tag))?)
}

fn serialize_empty_event(tag: BytesStart<'_>, writer: &mut Writer<impl Write>) -> Result<()> {
    Ok(writer.write_event(Event::Empty(tag))?)
}
