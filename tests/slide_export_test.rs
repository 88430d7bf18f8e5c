/// Integration tests for slide export.
///
/// These tests drive the full export sequence from a parsed presentation
/// through the converter seam to files in an output directory.
///
/// ## Running Tests
///
/// ```bash
/// cargo test --test slide_export_test
/// ```

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use slide_export::{
        config::ExportOptions,
        converter::{SlideConverter, Svg2PdfConverter},
        exporter::SlideExporter,
        layers::LayerSet,
        report::SlideStatus,
        svg::SvgDocument,
        ConvertError,
    };
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const DECK: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- Created with Inkscape (http://www.inkscape.org/) -->
<svg
   xmlns:svg="http://www.w3.org/2000/svg"
   xmlns="http://www.w3.org/2000/svg"
   xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
   width="320"
   height="240"
   viewBox="0 0 320 240">
  <defs id="defs2"/>
  <g inkscape:label="Background" inkscape:groupmode="layer" id="layer1">
    <rect x="0" y="0" width="320" height="240" fill="#eeeeee"/>
    <text x="300" y="230" id="text1"><tspan id="tspan1" x="300" y="230">$sn</tspan></text>
  </g>
  <g inkscape:label="Title" inkscape:groupmode="layer" id="layer2">
    <rect x="40" y="40" width="240" height="60" fill="navy"/>
  </g>
  <g inkscape:label="Slide A" inkscape:groupmode="layer" id="layer3">
    <circle cx="160" cy="120" r="50" fill="red"/>
  </g>
  <g inkscape:label="Slide B" inkscape:groupmode="layer" id="layer4">
    <rect x="110" y="70" width="100" height="100" fill="green"/>
  </g>
</svg>
"##;

    /// Converter that copies the scratch document next to the PDF name,
    /// so tests can inspect exactly what would have been rendered.
    #[derive(Default)]
    struct RecordingConverter {
        calls: RefCell<Vec<(PathBuf, String)>>,
    }

    impl SlideConverter for RecordingConverter {
        fn convert(&self, svg_path: &Path, pdf_path: &Path) -> Result<(), ConvertError> {
            let svg = std::fs::read_to_string(svg_path)?;
            std::fs::write(pdf_path, b"%PDF-1.7\n")?;
            self.calls.borrow_mut().push((pdf_path.to_path_buf(), svg));
            Ok(())
        }
    }

    /// Converter that always fails after checking the scratch file exists.
    struct FailingConverter {
        scratch_paths: RefCell<Vec<PathBuf>>,
    }

    impl SlideConverter for FailingConverter {
        fn convert(&self, svg_path: &Path, _pdf_path: &Path) -> Result<(), ConvertError> {
            assert!(svg_path.exists(), "scratch document should exist during conversion");
            self.scratch_paths.borrow_mut().push(svg_path.to_path_buf());
            Err(ConvertError::OutputMissing(PathBuf::from("nowhere.pdf")))
        }
    }

    fn pdf_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn visible_labels(svg: &str) -> Vec<String> {
        let doc = SvgDocument::parse(svg).unwrap();
        let layers = LayerSet::enumerate(&doc);
        layers
            .ids()
            .iter()
            .filter(|l| !l.is_hidden(&doc))
            .filter_map(|l| l.label(&doc).map(str::to_string))
            .collect()
    }

    /// Background/Title/Slide A/Slide B produces exactly 1.pdf, 2.pdf and 0.pdf.
    #[test]
    fn test_presentation_export() {
        let dir = TempDir::new().unwrap();
        let options = ExportOptions::new("Background", "Title", dir.path().to_string_lossy());
        let converter = RecordingConverter::default();
        let mut document = SvgDocument::parse(DECK).unwrap();

        let report = SlideExporter::new(&options, &converter)
            .run(&mut document)
            .unwrap();

        assert_eq!(pdf_names(dir.path()), vec!["0.pdf", "1.pdf", "2.pdf"]);
        assert_eq!(report.exported_count(), 3);

        let calls = converter.calls.borrow();
        let rendered: Vec<(String, Vec<String>)> = calls
            .iter()
            .map(|(pdf, svg)| {
                (
                    pdf.file_name().unwrap().to_string_lossy().into_owned(),
                    visible_labels(svg),
                )
            })
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("1.pdf".to_string(), vec!["Background".to_string(), "Slide A".to_string()]),
                ("2.pdf".to_string(), vec!["Background".to_string(), "Slide B".to_string()]),
                ("0.pdf".to_string(), vec!["Title".to_string()]),
            ]
        );

        assert!(calls[0].1.contains(r#"slidenumber="1">1</tspan>"#));
        assert!(calls[1].1.contains(r#"slidenumber="2">2</tspan>"#));
    }

    /// Stamps never leak into the document after the run.
    #[test]
    fn test_document_is_left_with_placeholders() {
        let dir = TempDir::new().unwrap();
        let options = ExportOptions::new("Background", "Title", dir.path().to_string_lossy());
        let converter = RecordingConverter::default();
        let mut document = SvgDocument::parse(DECK).unwrap();

        SlideExporter::new(&options, &converter)
            .run(&mut document)
            .unwrap();

        let xml = document.to_xml_string();
        assert!(xml.contains(r#"<tspan id="tspan1" x="300" y="230">$sn</tspan>"#));
        assert!(!xml.contains("slidenumber"));
    }

    /// Failures are reported per slide and scratch files are still removed.
    #[test]
    fn test_failed_conversions_are_reported() {
        let dir = TempDir::new().unwrap();
        let options = ExportOptions::new("Background", "Title", dir.path().to_string_lossy());
        let converter = FailingConverter {
            scratch_paths: RefCell::new(Vec::new()),
        };
        let mut document = SvgDocument::parse(DECK).unwrap();

        let report = SlideExporter::new(&options, &converter)
            .run(&mut document)
            .unwrap();

        assert_eq!(report.failed_count(), 3);
        assert!(report.slides.iter().all(|j| j.status == SlideStatus::Failed));
        assert!(pdf_names(dir.path()).is_empty());
        for scratch in converter.scratch_paths.borrow().iter() {
            assert!(!scratch.exists());
        }
    }

    /// Bare directory names are rejected before any export.
    #[test]
    fn test_invalid_output_directory() {
        let options = ExportOptions::new("Background", "Title", "slides");
        let converter = RecordingConverter::default();
        let mut document = SvgDocument::parse(DECK).unwrap();

        let result = SlideExporter::new(&options, &converter).run(&mut document);

        assert!(result.is_err());
        assert!(converter.calls.borrow().is_empty());
    }

    /// Full pipeline through svg2pdf produces real PDF files.
    #[test]
    fn test_svg2pdf_export() {
        let dir = TempDir::new().unwrap();
        let options = ExportOptions::new("Background", "Title", dir.path().to_string_lossy());
        let converter = Svg2PdfConverter::default();
        let mut document = SvgDocument::parse(DECK).unwrap();

        let report = SlideExporter::new(&options, &converter)
            .run(&mut document)
            .unwrap();

        assert_eq!(report.failed_count(), 0, "{:?}", report.slides);
        for name in ["0.pdf", "1.pdf", "2.pdf"] {
            let pdf = std::fs::read(dir.path().join(name)).unwrap();
            assert!(pdf.starts_with(b"%PDF"), "{} is not a PDF", name);
        }
    }
}
