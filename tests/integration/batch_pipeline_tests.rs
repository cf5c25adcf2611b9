/*!
 * End-to-end tests for chapter processing with a scripted provider
 */

use anyhow::Result;
use std::fs;

use crate::common;
use panelwise::app_controller::page_separator;
use panelwise::providers::mock::MockProvider;
use panelwise::{BatchOutcome, Controller, GlossaryStore};

/// An empty input folder finishes cleanly without writing outputs
#[tokio::test]
async fn test_run_withNoImages_shouldFinishWithoutOutputs() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "empty", &[])?;
    let provider = MockProvider::working();

    let outcome = Controller::new(&project, &provider).run().await?;

    assert_eq!(outcome, BatchOutcome::NoImages);
    assert!(common::list_files(project.output_dir())?.is_empty());
    assert!(provider.requests().is_empty());
    Ok(())
}

/// N pages produce N page files plus one chapter file in sorted order
#[tokio::test]
async fn test_run_withThreeImages_shouldWriteEveryPageAndChapter() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "chapter-1", &["010.png", "002.jpg", "001.webp"])?;
    let provider = MockProvider::working();

    let outcome = Controller::new(&project, &provider).run().await?;

    assert_eq!(
        outcome,
        BatchOutcome::Completed {
            pages: 3,
            chapter_file: project.chapter_output_path(),
        }
    );
    assert_eq!(
        common::list_files(project.output_dir())?,
        vec!["001.txt", "002.txt", "010.txt", "full_chapter_translation.txt"]
    );
    assert_eq!(fs::read_to_string(common::page_output(&project, "002"))?, "[PAGE 1] 002.jpg");

    let expected_chapter = [
        format!("[PAGE 0] 001.webp{}", page_separator("001.webp")),
        format!("[PAGE 1] 002.jpg{}", page_separator("002.jpg")),
        format!("[PAGE 2] 010.png{}", page_separator("010.png")),
    ]
    .join("\n");
    assert_eq!(fs::read_to_string(project.chapter_output_path())?, expected_chapter);
    Ok(())
}

/// Each page sees the previous page's raw translation, and only that one
#[tokio::test]
async fn test_run_shouldCarryPreviousTranslationForward() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "context", &["a.png", "b.png", "c.png"])?;
    let provider = MockProvider::working();

    Controller::new(&project, &provider).run().await?;

    let pages = provider.page_requests();
    assert_eq!(pages.len(), 3);
    assert!(!pages[0].prompt.contains("PREVIOUS PAGE CONTEXT"));
    assert!(pages[1].prompt.contains("[PAGE 0] a.png"));
    assert!(pages[2].prompt.contains("[PAGE 1] b.png"));
    assert!(!pages[2].prompt.contains("[PAGE 0] a.png"));
    Ok(())
}

/// A failing page stops the run, keeps earlier pages and skips the chapter file
#[tokio::test]
async fn test_run_withFailureOnSecondPage_shouldAbortAfterFirstPage() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "abort", &["1.png", "2.png", "3.png"])?;
    let provider = MockProvider::failing_on_page(1);

    let result = Controller::new(&project, &provider).run().await;

    assert!(result.is_err());
    assert_eq!(common::list_files(project.output_dir())?, vec!["1.txt"]);
    assert!(!project.chapter_output_path().exists());

    let pages = provider.page_requests();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].image.as_ref().map(|i| i.file_name.as_str()), Some("2.png"));
    assert_eq!(provider.term_requests().len(), 1);
    Ok(())
}

/// Terms found on one page are used by the next page and persisted
#[tokio::test]
async fn test_run_newTerms_shouldReachLaterPagesAndDisk() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "terms", &["01.png", "02.png"])?;
    fs::write(project.glossary_file(), r#"{"Hunter": "صياد"}"#)?;
    let provider = MockProvider::working().with_term_responses([
        "```json\n{\"Igris\": \"إيغريس\", \"Hunter\": \"قناص\"}\n```",
        "{}",
    ]);

    Controller::new(&project, &provider).run().await?;

    let pages = provider.page_requests();
    assert!(!pages[0].prompt.contains("Igris"));
    assert!(pages[1].prompt.contains("- Igris: إيغريس"));

    let stored = GlossaryStore::new(project.glossary_file()).load()?;
    assert_eq!(stored.get("Hunter").as_deref(), Some("صياد"));
    assert_eq!(stored.get("Igris").as_deref(), Some("إيغريس"));
    assert_eq!(stored.len(), 2);
    Ok(())
}

/// A corrupt glossary is ignored and left untouched when nothing new is found
#[tokio::test]
async fn test_run_withCorruptGlossary_shouldLeaveFileUntouched() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "corrupt", &["01.png"])?;
    fs::write(project.glossary_file(), "{ not json")?;
    let provider = MockProvider::working();

    let outcome = Controller::new(&project, &provider).run().await?;

    assert!(matches!(outcome, BatchOutcome::Completed { pages: 1, .. }));
    assert_eq!(fs::read_to_string(project.glossary_file())?, "{ not json");
    Ok(())
}

/// Term extraction failures never stop the batch
#[tokio::test]
async fn test_run_withFailingTermRequests_shouldStillComplete() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "flaky", &["01.png", "02.png"])?;
    let provider = MockProvider::working()
        .with_failing_terms();

    let outcome = Controller::new(&project, &provider).run().await?;

    assert!(matches!(outcome, BatchOutcome::Completed { pages: 2, .. }));
    assert_eq!(fs::read_to_string(project.glossary_file())?, "{}");
    Ok(())
}

/// Garbled term responses are absorbed page by page
#[tokio::test]
async fn test_run_withGarbledTermResponse_shouldContinue() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let project = common::create_project(temp.path(), "garbled", &["01.png", "02.png"])?;
    let provider = MockProvider::working()
        .with_term_responses(["no JSON here", "{\"Mana\": \"مانا\"}"]);

    Controller::new(&project, &provider).run().await?;

    let stored = GlossaryStore::new(project.glossary_file()).load()?;
    assert_eq!(stored.terms().collect::<Vec<_>>(), vec!["Mana"]);
    Ok(())
}
