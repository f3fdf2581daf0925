//! Integration tests for the text tool
//!
//! These tests drive complete sessions the way a shell would: edits and
//! button presses in, display and collaborator effects out.

use services_text_tools::{
    create_default_registry, load_registry, DirectoryExporter, MemoryClipboard, MemoryExporter,
    NotificationLevel, SettingValue, TextTool, ToolAction, ToolSettings, UnavailableClipboard,
};
use text_core::{parse_action, Action, CaseConversion, DisplayMode};

fn tool_with_handles() -> (TextTool, MemoryClipboard, MemoryExporter) {
    let clipboard = MemoryClipboard::new();
    let exporter = MemoryExporter::new();
    let tool = TextTool::with_io(
        ToolSettings::default(),
        Box::new(clipboard.clone()),
        Box::new(exporter.clone()),
    );
    (tool, clipboard, exporter)
}

fn press(tool: &mut TextTool, name: &str) -> ToolAction {
    tool.apply(parse_action(name).unwrap())
}

#[test]
fn test_convert_then_copy_and_download() {
    let (mut tool, clipboard, exporter) = tool_with_handles();

    tool.apply(Action::Edit("the lord of the rings".into()));
    press(&mut tool, "title");
    assert_eq!(tool.display(), "The Lord of the Rings");

    assert!(matches!(press(&mut tool, "copy"), ToolAction::Copied));
    assert_eq!(clipboard.contents().as_deref(), Some("The Lord of the Rings"));

    assert!(matches!(press(&mut tool, "download"), ToolAction::Exported(_)));
    assert_eq!(
        exporter.files(),
        vec![(
            "transformed-text.txt".to_string(),
            "The Lord of the Rings".to_string()
        )]
    );
}

#[test]
fn test_count_mode_tracks_edits() {
    let (mut tool, _, _) = tool_with_handles();

    tool.apply(Action::Edit("one".into()));
    press(&mut tool, "count");
    assert_eq!(tool.display(), "Words: 1 | Characters: 3");

    // Typing while the summary is shown keeps it current
    tool.apply(Action::Edit("one two".into()));
    assert_eq!(tool.display(), "Words: 2 | Characters: 7");
    assert_eq!(tool.session().mode(), DisplayMode::Count);

    // Any conversion goes back to the buffer
    press(&mut tool, "upper");
    assert_eq!(tool.session().mode(), DisplayMode::Input);
    assert_eq!(tool.display(), "ONE TWO");
}

#[test]
fn test_clear_resets_session_and_guards_outputs() {
    let (mut tool, clipboard, exporter) = tool_with_handles();

    tool.apply(Action::Edit("temporary".into()));
    press(&mut tool, "count");
    press(&mut tool, "clear");

    assert_eq!(tool.display(), "");
    assert_eq!(tool.session().summary(), "");
    assert_eq!(tool.session().mode(), DisplayMode::Input);

    assert!(matches!(press(&mut tool, "copy"), ToolAction::Unchanged));
    assert!(matches!(press(&mut tool, "download"), ToolAction::Unchanged));
    assert_eq!(clipboard.write_count(), 0);
    assert!(exporter.files().is_empty());
}

#[test]
fn test_every_conversion_is_safe_on_empty_buffer() {
    let (mut tool, _, _) = tool_with_handles();
    for conversion in CaseConversion::ALL {
        let result = tool.apply(Action::Convert(conversion));
        assert!(matches!(result, ToolAction::Unchanged), "{}", conversion);
        assert_eq!(tool.display(), "");
    }
}

#[test]
fn test_clipboard_failure_is_non_fatal() {
    let exporter = MemoryExporter::new();
    let mut tool = TextTool::with_io(
        ToolSettings::default(),
        Box::new(UnavailableClipboard::new("headless session")),
        Box::new(exporter.clone()),
    );

    tool.apply(Action::Edit("still here".into()));
    assert!(matches!(press(&mut tool, "copy"), ToolAction::IoFailed(_)));

    // Session keeps working after the failure
    assert_eq!(tool.display(), "still here");
    assert!(matches!(press(&mut tool, "download"), ToolAction::Exported(_)));
    assert_eq!(exporter.files().len(), 1);

    let errors = tool.notifications().by_level(NotificationLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("headless session"));
}

#[test]
fn test_download_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut tool = TextTool::with_io(
        ToolSettings::default(),
        Box::new(MemoryClipboard::new()),
        Box::new(DirectoryExporter::new(dir.path())),
    );

    tool.apply(Action::Edit("hello. world!".into()));
    press(&mut tool, "sentence");

    match press(&mut tool, "download") {
        ToolAction::Exported(receipt) => {
            assert_eq!(receipt.location, dir.path().join("transformed-text.txt"));
            let written = std::fs::read_to_string(&receipt.location).unwrap();
            assert_eq!(written, "Hello. World!");
        }
        other => panic!("Expected export, got {:?}", other),
    }
}

#[test]
fn test_download_failure_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let mut tool = TextTool::with_io(
        ToolSettings::default(),
        Box::new(MemoryClipboard::new()),
        Box::new(DirectoryExporter::new(&missing)),
    );

    tool.apply(Action::Edit("text".into()));
    match press(&mut tool, "download") {
        ToolAction::IoFailed(err) => assert!(err.to_string().contains("does-not-exist")),
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(tool.display(), "text");
}

#[test]
fn test_settings_file_drives_session() {
    let registry = load_registry(
        br#"{
            "version": 1,
            "overrides": {
                "title.minor_words": ["with"],
                "count.unit": "utf16",
                "export.file_name": "title.txt"
            }
        }"#,
    )
    .unwrap();

    let exporter = MemoryExporter::new();
    let mut tool = TextTool::with_io(
        registry.tool_settings(),
        Box::new(MemoryClipboard::new()),
        Box::new(exporter.clone()),
    );

    tool.apply(Action::Edit("gone with the wind \u{1F32C}".into()));
    press(&mut tool, "title");
    assert_eq!(tool.display(), "Gone with The Wind \u{1F32C}");

    press(&mut tool, "count");
    assert_eq!(tool.display(), "Words: 5 | Characters: 21");

    press(&mut tool, "download");
    assert_eq!(exporter.files()[0].0, "title.txt");
}

#[test]
fn test_runtime_settings_change() {
    let mut registry = create_default_registry();
    let (mut tool, _, _) = tool_with_handles();

    tool.apply(Action::Edit("e\u{301}".into()));
    press(&mut tool, "count");
    assert_eq!(tool.display(), "Words: 1 | Characters: 2");

    registry
        .set_override("count.unit", SettingValue::String("graphemes".into()))
        .unwrap();
    tool.apply_settings(registry.tool_settings());
    assert_eq!(tool.display(), "Words: 1 | Characters: 1");
}
