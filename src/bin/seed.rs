use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use autosalon_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;

    let admin_id = ensure_user(&pool, "admin", "admin@example.com", "admin123", "admin").await?;
    let manager_id =
        ensure_user(&pool, "manager", "manager@example.com", "manager123", "manager").await?;
    let client_id =
        ensure_user(&pool, "client", "client@example.com", "client123", "client").await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Admin: {admin_id}, Manager: {manager_id}, Client: {client_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let brands = vec![
        ("Toyota", "Japan", "Reliability above all"),
        ("BMW", "Germany", "Driving pleasure"),
        ("Lada", "Russia", "The people's car"),
    ];

    for (name, country, description) in &brands {
        sqlx::query(
            r#"
            INSERT INTO brands (id, name, country, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(country)
        .bind(description)
        .execute(pool)
        .await?;
    }

    let cars = vec![
        ("Toyota", "Camry", 2022, 3_200_000_i64, 15_000, "black", "automatic", "petrol", 2.5, 200),
        ("Toyota", "Corolla", 2020, 2_100_000_i64, 48_000, "white", "variator", "hybrid", 1.8, 122),
        ("BMW", "X5", 2023, 9_500_000_i64, 5_000, "blue", "automatic", "diesel", 3.0, 340),
        ("Lada", "Vesta", 2024, 1_450_000_i64, 0, "red", "manual", "petrol", 1.6, 106),
    ];

    for (brand, model, year, price, mileage, color, transmission, fuel, volume, hp) in cars {
        let brand_id: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM brands WHERE name = $1")
            .bind(brand)
            .fetch_optional(pool)
            .await?;
        let Some((brand_id,)) = brand_id else {
            continue;
        };

        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM cars WHERE brand_id = $1 AND model = $2 AND year = $3")
                .bind(brand_id)
                .bind(model)
                .bind(year)
                .fetch_optional(pool)
                .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO cars (id, brand_id, model, year, price, mileage, color,
                              transmission, fuel_type, engine_volume, horsepower)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(brand_id)
        .bind(model)
        .bind(year)
        .bind(price)
        .bind(mileage)
        .bind(color)
        .bind(transmission)
        .bind(fuel)
        .bind(volume)
        .bind(hp)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}
