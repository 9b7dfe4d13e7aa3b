use sqlx::sqlite::SqlitePool;
use tracing::info;

/// Create the demo library schema: authors, books and loans
pub async fn setup(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            country TEXT,
            is_living BOOLEAN NOT NULL DEFAULT 1
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            author_id INTEGER NOT NULL REFERENCES authors(id),
            title TEXT NOT NULL,
            published INTEGER,
            price REAL,
            in_print BOOLEAN NOT NULL DEFAULT 1
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS loans (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books(id),
            borrower TEXT NOT NULL,
            borrowed_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            returned BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    // Seed sample data if tables are empty
    seed_sample_data(pool).await
}

async fn seed_sample_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let author_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(pool)
        .await?;
    if author_count > 0 {
        return Ok(());
    }

    let authors = [
        ("Ursula K. Le Guin", "United States", false),
        ("Chinua Achebe", "Nigeria", false),
        ("Haruki Murakami", "Japan", true),
        ("Olga Tokarczuk", "Poland", true),
        ("Italo Calvino", "Italy", false),
        ("Chimamanda Ngozi Adichie", "Nigeria", true),
    ];
    for (name, country, is_living) in authors {
        sqlx::query("INSERT INTO authors (name, country, is_living) VALUES (?, ?, ?)")
            .bind(name)
            .bind(country)
            .bind(is_living)
            .execute(pool)
            .await?;
    }

    // Enough books to page through
    let subjects = ["Rivers", "Cities", "Winter", "Letters", "Islands", "Clocks", "Gardens"];
    let book_total = 60;
    for index in 0..book_total {
        let author_id = (index % authors.len()) as i64 + 1;
        let title = format!("The {} of {}", subjects[index % subjects.len()], 1900 + index * 3);
        let price = 7.5 + (index % 9) as f64 * 1.25;

        sqlx::query(
            "INSERT INTO books (author_id, title, published, price, in_print) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(author_id)
        .bind(title)
        .bind(1950 + index as i64)
        .bind(price)
        .bind(index % 4 != 0)
        .execute(pool)
        .await?;
    }

    let borrowers = ["Ada", "Grace", "Linus", "Barbara", "Ken"];
    let loan_total = 40;
    for index in 0..loan_total {
        sqlx::query("INSERT INTO loans (book_id, borrower, returned) VALUES (?, ?, ?)")
            .bind((index * 7 % book_total) as i64 + 1)
            .bind(borrowers[index % borrowers.len()])
            .bind(index % 3 == 0)
            .execute(pool)
            .await?;
    }

    info!(
        authors = authors.len(),
        books = book_total,
        loans = loan_total,
        "sample data seeded"
    );
    Ok(())
}
