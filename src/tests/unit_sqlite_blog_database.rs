use crate::database::sqlite::{SqliteRepository, connect};
use crate::database::{ArticleRepository, AuthorRepository, CommentRepository};
use crate::domain::{Article, Author, Comment};

// create a sqlite database in memory to test against
// one connection only, every connection to :memory: would get its own database
async fn setup_test_db() -> SqliteRepository {
    let pool = connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory database");

    SqliteRepository::new(pool)
}

fn create_mock_author(first_name: &str) -> Author {
    Author {
        id: None,
        first_name: Some(first_name.to_string()),
        last_name: Some("Silva".to_string()),
        bio: None,
    }
}

fn create_mock_article(title: &str, author_ids: &[i64]) -> Article {
    let mut article = Article {
        title: Some(title.to_string()),
        subtitle: Some("Sub".to_string()),
        content: Some("Corpo".to_string()),
        authors: author_ids
            .iter()
            .map(|id| Author {
                id: Some(*id),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    article.generate_permalink();
    article
}

fn create_mock_comment(article_id: i64, text: &str) -> Comment {
    Comment {
        article_id: Some(article_id),
        user: Some("leitor".to_string()),
        text: Some(text.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_sqlite_author_round_trip() {
    let repo = setup_test_db().await;

    let id = repo
        .create_author(&create_mock_author("Ana"))
        .await
        .expect("Should save author");
    let retrieved = repo
        .get_author(id)
        .await
        .expect("Should query")
        .expect("Should find author");

    assert_eq!(retrieved.id, Some(id));
    assert_eq!(retrieved.first_name.as_deref(), Some("Ana"));
    assert_eq!(retrieved.bio, None);
}

#[tokio::test]
async fn test_sqlite_update_and_delete_author() {
    let repo = setup_test_db().await;
    let id = repo.create_author(&create_mock_author("Ana")).await.unwrap();

    let mut author = repo.get_author(id).await.unwrap().unwrap();
    author.bio = Some("Jornalista".to_string());
    assert!(repo.update_author(&author).await.unwrap());
    assert_eq!(
        repo.get_author(id).await.unwrap().unwrap().bio.as_deref(),
        Some("Jornalista")
    );

    assert!(repo.delete_author(id).await.unwrap());
    assert!(repo.get_author(id).await.unwrap().is_none());
    // a second delete finds nothing
    assert!(!repo.delete_author(id).await.unwrap());
}

#[tokio::test]
async fn test_sqlite_authors_exist() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();
    let b = repo.create_author(&create_mock_author("Bia")).await.unwrap();

    assert!(repo.authors_exist(&[a, b]).await.unwrap());
    // duplicates count once
    assert!(repo.authors_exist(&[a, a, b]).await.unwrap());
    assert!(!repo.authors_exist(&[a, 999]).await.unwrap());
    assert!(repo.authors_exist(&[]).await.unwrap());
}

#[tokio::test]
async fn test_sqlite_article_with_relations() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();
    let b = repo.create_author(&create_mock_author("Bia")).await.unwrap();

    let article_id = repo
        .create_article(&create_mock_article("Primeiro Artigo", &[b, a]))
        .await
        .expect("Should save article");
    repo.create_comment(&create_mock_comment(article_id, "oi"))
        .await
        .unwrap();

    let article = repo
        .get_article_by_permalink("primeiro-artigo")
        .await
        .unwrap()
        .expect("Should find article");

    assert_eq!(article.id, Some(article_id));
    assert!(article.published_datetime.is_some());
    assert!(article.modified_datetime.is_none());
    assert_eq!(article.author_ids(), vec![a, b]);
    assert_eq!(article.comments.len(), 1);
    assert_eq!(article.comments[0].text.as_deref(), Some("oi"));

    let by_id = repo.get_article_by_id(article_id).await.unwrap().unwrap();
    assert_eq!(by_id, article);
}

// the list query stitches relations in memory; make sure nothing leaks across articles
#[tokio::test]
async fn test_sqlite_get_all_articles_groups_relations() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();
    let b = repo.create_author(&create_mock_author("Bia")).await.unwrap();

    let first = repo
        .create_article(&create_mock_article("Um", &[a]))
        .await
        .unwrap();
    let second = repo
        .create_article(&create_mock_article("Dois", &[a, b]))
        .await
        .unwrap();
    let third = repo
        .create_article(&create_mock_article("Tres", &[b]))
        .await
        .unwrap();
    repo.create_comment(&create_mock_comment(second, "c1"))
        .await
        .unwrap();
    repo.create_comment(&create_mock_comment(second, "c2"))
        .await
        .unwrap();

    let articles = repo.get_all_articles().await.unwrap();
    let ids: Vec<Option<i64>> = articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(first), Some(second), Some(third)]);

    assert_eq!(articles[0].author_ids(), vec![a]);
    assert_eq!(articles[1].author_ids(), vec![a, b]);
    assert_eq!(articles[2].author_ids(), vec![b]);
    assert!(articles[0].comments.is_empty());
    assert_eq!(articles[1].comments.len(), 2);
    assert!(articles[2].comments.is_empty());
}

#[tokio::test]
async fn test_sqlite_update_article() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();
    let b = repo.create_author(&create_mock_author("Bia")).await.unwrap();
    let id = repo
        .create_article(&create_mock_article("Antigo", &[a]))
        .await
        .unwrap();

    // no authors on the update: links stay as they are
    let mut article = repo.get_article_by_id(id).await.unwrap().unwrap();
    article.title = Some("Novo Título".to_string());
    article.authors.clear();
    article.generate_permalink();
    assert!(repo.update_article(&article).await.unwrap());

    let updated = repo
        .get_article_by_permalink("novo-titulo")
        .await
        .unwrap()
        .expect("Should find renamed article");
    assert!(updated.modified_datetime.is_some());
    assert_eq!(updated.author_ids(), vec![a]);

    // a non-empty list replaces them
    let mut article = updated;
    article.authors = vec![Author {
        id: Some(b),
        ..Default::default()
    }];
    assert!(repo.update_article(&article).await.unwrap());
    assert_eq!(
        repo.get_article_by_id(id).await.unwrap().unwrap().author_ids(),
        vec![b]
    );

    let mut missing = article.clone();
    missing.id = Some(999);
    assert!(!repo.update_article(&missing).await.unwrap());
}

#[tokio::test]
async fn test_sqlite_unique_permalink_constraint() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();

    repo.create_article(&create_mock_article("Mesmo Título", &[a]))
        .await
        .unwrap();
    let result = repo
        .create_article(&create_mock_article("Mesmo Título", &[a]))
        .await;

    assert!(
        result.is_err(),
        "Should fail due to unique permalink constraint"
    );
    // the failed insert must not leave half an article behind
    assert_eq!(repo.get_all_articles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sqlite_delete_article_cascades() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();
    let id = repo
        .create_article(&create_mock_article("Apagar", &[a]))
        .await
        .unwrap();
    let comment_id = repo
        .create_comment(&create_mock_comment(id, "tchau"))
        .await
        .unwrap();

    assert!(repo.delete_article_by_permalink("apagar").await.unwrap());
    assert!(repo.get_article_by_id(id).await.unwrap().is_none());
    assert!(repo.get_comment(comment_id).await.unwrap().is_none());
    // the author outlives the article
    assert!(repo.get_author(a).await.unwrap().is_some());

    assert!(!repo.delete_article_by_id(id).await.unwrap());
}

#[tokio::test]
async fn test_sqlite_comments_by_permalink() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();
    let one = repo
        .create_article(&create_mock_article("Um", &[a]))
        .await
        .unwrap();
    let two = repo
        .create_article(&create_mock_article("Dois", &[a]))
        .await
        .unwrap();

    repo.create_comment(&create_mock_comment(one, "a")).await.unwrap();
    repo.create_comment(&create_mock_comment(two, "b")).await.unwrap();
    repo.create_comment(&create_mock_comment(one, "c")).await.unwrap();

    let texts: Vec<String> = repo
        .get_comments_by_permalink("um")
        .await
        .unwrap()
        .into_iter()
        .filter_map(|c| c.text)
        .collect();
    assert_eq!(texts, vec!["a", "c"]);

    assert_eq!(repo.get_all_comments().await.unwrap().len(), 3);
    assert!(repo
        .get_comments_by_permalink("nao-existe")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_sqlite_update_comment() {
    let repo = setup_test_db().await;
    let a = repo.create_author(&create_mock_author("Ana")).await.unwrap();
    let article_id = repo
        .create_article(&create_mock_article("Um", &[a]))
        .await
        .unwrap();
    let id = repo
        .create_comment(&create_mock_comment(article_id, "antes"))
        .await
        .unwrap();

    let mut comment = repo.get_comment(id).await.unwrap().unwrap();
    assert!(comment.created_datetime.is_some());
    comment.text = Some("depois".to_string());
    assert!(repo.update_comment(&comment).await.unwrap());
    assert_eq!(
        repo.get_comment(id).await.unwrap().unwrap().text.as_deref(),
        Some("depois")
    );

    assert!(repo.delete_comment(id).await.unwrap());
    assert!(!repo.delete_comment(id).await.unwrap());
}

// a comment pointing at an article that does not exist is refused by the schema
#[tokio::test]
async fn test_sqlite_comment_foreign_key() {
    let repo = setup_test_db().await;
    let result = repo.create_comment(&create_mock_comment(42, "orfao")).await;

    assert!(result.is_err());
}

// the database file is created on first connect and survives a new pool
#[tokio::test]
async fn test_sqlite_on_disk_database() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("blog.db").display());

    {
        let pool = connect(&url, 2).await.expect("Should create database");
        let repo = SqliteRepository::new(pool.clone());
        repo.create_author(&create_mock_author("Ana")).await.unwrap();
        pool.close().await;
    }

    assert!(dir.path().join("blog.db").exists());

    let pool = connect(&url, 2).await.expect("Should reopen database");
    let repo = SqliteRepository::new(pool);
    let authors = repo.get_all_authors().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].first_name.as_deref(), Some("Ana"));
}
