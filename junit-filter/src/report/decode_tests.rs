use indoc::indoc;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::errors::DecodeError;
use super::*;

type DecodeResult = std::result::Result<(), DecodeError>;

const GINKGO_REPORT: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <testsuites tests="3" disabled="0" errors="0" failures="1" time="12.5">
      <testsuite name="Lustre CSI E2E" package="/e2e" tests="3">
        <properties>
          <property name="SuiteSucceeded" value="false"></property>
        </properties>
        <testcase name="[It] mounts a volume" classname="Lustre CSI E2E" status="passed" time="4.2">
          <system-out>mounted at /mnt/lustre</system-out>
        </testcase>
        <testcase name="[It] resizes a volume" classname="Lustre CSI E2E" status="failed" time="7.1">
          <failure message="expected 2Ti" type="failed">size mismatch</failure>
          <system-err>ignored</system-err>
        </testcase>
      </testsuite>
      <testsuite name="Lustre CSI E2E shard 2">
        <testcase name="[It] snapshots a volume" status="skipped" time="0">
          <skipped message="skipped"/>
        </testcase>
      </testsuite>
    </testsuites>
"#};

#[test]
fn decodes_suites_and_cases_in_document_order() -> DecodeResult {
    let document = decode_report(GINKGO_REPORT)?;

    assert_eq!(document.suites.len(), 2);
    assert_eq!(document.suites[0].name.as_deref(), Some("Lustre CSI E2E"));
    assert_eq!(
        document.cases().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec![
            "[It] mounts a volume",
            "[It] resizes a volume",
            "[It] snapshots a volume"
        ]
    );

    let cases = document.into_cases().collect::<Vec<_>>();
    assert_eq!(
        cases[0],
        Case {
            name: String::from("[It] mounts a volume"),
            elapsed: String::from("4.2"),
            stdout: Some(String::from("mounted at /mnt/lustre")),
            failure: None,
            skip: SkipState::Absent,
        }
    );
    assert_eq!(cases[1].failure.as_deref(), Some("size mismatch"));
    assert_eq!(cases[1].stdout, None);
    assert_eq!(cases[2].skip, SkipState::PresentEmpty);
    assert!(cases[2].is_skipped());

    Ok(())
}

#[rstest]
#[case("", SkipState::Absent)]
#[case("<skipped/>", SkipState::PresentEmpty)]
#[case("<skipped></skipped>", SkipState::PresentEmpty)]
#[case(r#"<skipped message="not on this cluster"/>"#, SkipState::PresentEmpty)]
#[case("<skipped>flaky on GKE</skipped>", SkipState::PresentWithText(String::from("flaky on GKE")))]
#[case("<skipped><![CDATA[needs <2> nodes]]></skipped>", SkipState::PresentWithText(String::from("needs <2> nodes")))]
#[case("<skipped> </skipped>", SkipState::PresentWithText(String::from(" ")))]
fn decodes_skip_state(
    #[case] skipped: &str,
    #[case] expected: SkipState,
) -> DecodeResult {
    let content = format!(
        r#"<testsuites><testsuite><testcase name="t" time="1">{skipped}</testcase></testsuite></testsuites>"#
    );
    let document = decode_report(&content)?;
    let case = document.into_cases().next().unwrap();
    assert_eq!(case.skip, expected);
    Ok(())
}

#[test]
fn unescapes_attributes_and_text() -> DecodeResult {
    let content = r#"<testsuites><testsuite><testcase name="a &amp; b" time="&quot;1&quot;"><failure>x &lt; y</failure></testcase></testsuite></testsuites>"#;
    let case = decode_report(content)?.into_cases().next().unwrap();
    assert_eq!(case.name, "a & b");
    assert_eq!(case.elapsed, "\"1\"");
    assert_eq!(case.failure.as_deref(), Some("x < y"));
    Ok(())
}

#[test]
fn keeps_only_direct_text_of_captured_elements() -> DecodeResult {
    let content = indoc! {r#"
        <testsuites>
          <testsuite>
            <testcase name="nested" time="0.1"><failure>boom<detail>stack</detail>!</failure></testcase>
          </testsuite>
        </testsuites>
    "#};
    let case = decode_report(content)?.into_cases().next().unwrap();
    assert_eq!(case.failure.as_deref(), Some("boom!"));
    Ok(())
}

#[test]
fn empty_capture_element_is_present() -> DecodeResult {
    let content = r#"<testsuites><testsuite><testcase name="t" time="1"><system-out/></testcase></testsuite></testsuites>"#;
    let case = decode_report(content)?.into_cases().next().unwrap();
    assert_eq!(case.stdout.as_deref(), Some(""));
    Ok(())
}

#[test]
fn missing_attributes_decode_as_empty() -> DecodeResult {
    let content = "<testsuites><testsuite><testcase/></testsuite></testsuites>";
    let case = decode_report(content)?.into_cases().next().unwrap();
    assert_eq!(case.name, "");
    assert_eq!(case.elapsed, "");
    assert!(!case.has_children());
    Ok(())
}

#[test]
fn bare_testsuite_root_is_rejected() {
    let content = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <testsuite>
          <testcase name="only" time="2"/>
        </testsuite>
    "#};
    match decode_report(content) {
        Err(DecodeError::UnexpectedRoot(root)) => assert_eq!(root, "testsuite"),
        other => panic!("expected unexpected root, got {other:?}"),
    }
}

#[test]
fn empty_testsuites_has_no_suites() -> DecodeResult {
    assert_eq!(decode_report("<testsuites/>")?, ReportDocument::default());
    Ok(())
}

#[rstest]
#[case("")]
#[case(r#"<?xml version="1.0" encoding="UTF-8"?>"#)]
#[case("<!-- nothing here -->")]
fn document_without_root_is_rejected(#[case] content: &str) {
    assert!(matches!(
        decode_report(content),
        Err(DecodeError::MissingRoot)
    ));
}

#[test]
fn unknown_root_is_rejected() {
    match decode_report("<report><testsuite/></report>") {
        Err(DecodeError::UnexpectedRoot(root)) => assert_eq!(root, "report"),
        other => panic!("expected unexpected root error, got {other:?}"),
    }
}

#[rstest]
#[case("<testsuites><testsuite>", "testsuite")]
#[case("<testsuites>", "testsuites")]
#[case(r#"<testsuites><testsuite><testcase name="a"><failure>boom"#, "failure")]
fn truncated_document_is_rejected(#[case] content: &str, #[case] open: &str) {
    match decode_report(content) {
        Err(DecodeError::UnexpectedEof(element)) => assert_eq!(element, open),
        other => panic!("expected end of document error, got {other:?}"),
    }
}

#[rstest]
#[case("<testsuites></testsuite>")]
#[case(r#"<testsuites><testsuite><testcase name="a" name="b"/></testsuite></testsuites>"#)]
#[case(r#"<testsuites><testsuite><testcase name="a &bogus; b"/></testsuite></testsuites>"#)]
fn malformed_xml_is_rejected(#[case] content: &str) {
    assert!(matches!(
        decode_report(content),
        Err(DecodeError::Xml { .. })
    ));
}
