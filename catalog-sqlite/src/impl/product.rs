use crate::Db;
use crate::types::{CategoryRow, DateTime, ProductId, ProductRow};
use catalog_core::{
    models::{CatalogStats, CategoryStats, ProductData},
    ports::{ProductFailure, ProductRepository, RecordOf},
    query::{ProductFilter, Sort, SortField, Window},
    validate::FieldError,
};
use sqlx::{QueryBuilder, Sqlite, error::ErrorKind};

impl ProductRepository for Db {
    async fn create_product(
        &self,
        data: ProductData,
    ) -> Result<Result<RecordOf<Self>, ProductFailure>, Self::Error> {
        let now = DateTime::now();
        let inserted = sqlx::query_as::<_, ProductRow>(
            r#"
            insert into
                product (id, name, description, name_folded, description_folded, price, category, in_stock, created_at, updated_at)
            values
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            returning
                id, name, description, price, category, in_stock, created_at, updated_at
            "#,
        )
        .bind(ProductId::random())
        .bind(&data.name)
        .bind(&data.description)
        .bind(fold(&data.name))
        .bind(fold(&data.description))
        .bind(data.price)
        .bind(data.category.as_str())
        .bind(data.in_stock)
        .bind(now)
        .bind(now)
        .fetch_one(&self.writer)
        .await;

        match inserted {
            Ok(row) => Ok(Ok(row.try_into()?)),
            Err(err) => Ok(Err(refusal(err)?)),
        }
    }

    async fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Option<RecordOf<Self>>, Self::Error> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            select
                id, name, description, price, category, in_stock, created_at, updated_at
            from
                product
            where
                id = ?
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.reader)
        .await?
        .map(TryInto::try_into)
        .transpose()
    }

    async fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
    ) -> Result<Result<RecordOf<Self>, ProductFailure>, Self::Error> {
        // last write wins; there is no version check
        let updated = sqlx::query_as::<_, ProductRow>(
            r#"
            update
                product
            set
                name = ?,
                description = ?,
                name_folded = ?,
                description_folded = ?,
                price = ?,
                category = ?,
                in_stock = ?,
                updated_at = ?
            where
                id = ?
            returning
                id, name, description, price, category, in_stock, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(fold(&data.name))
        .bind(fold(&data.description))
        .bind(data.price)
        .bind(data.category.as_str())
        .bind(data.in_stock)
        .bind(DateTime::now())
        .bind(product_id)
        .fetch_optional(&self.writer)
        .await;

        match updated {
            Ok(Some(row)) => Ok(Ok(row.try_into()?)),
            Ok(None) => Ok(Err(ProductFailure::DoesNotExist)),
            Err(err) => Ok(Err(refusal(err)?)),
        }
    }

    async fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Result<(), ProductFailure>, Self::Error> {
        let result = sqlx::query("delete from product where id = ?")
            .bind(product_id)
            .execute(&self.writer)
            .await?;

        if result.rows_affected() == 0 {
            Ok(Err(ProductFailure::DoesNotExist))
        } else {
            Ok(Ok(()))
        }
    }

    async fn query_products(
        &self,
        filter: &ProductFilter,
        sort: Sort,
        window: Option<Window>,
    ) -> Result<Vec<RecordOf<Self>>, Self::Error> {
        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "select id, name, description, price, category, in_stock, created_at, updated_at from product",
        );
        push_filter(&mut query_builder, filter);
        push_sort(&mut query_builder, sort);
        if let Some(window) = window {
            query_builder
                .push(" limit ")
                .push_bind(sql_integer(window.take()))
                .push(" offset ")
                .push_bind(sql_integer(window.skip()));
        }

        query_builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.reader)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<u64, Self::Error> {
        let mut query_builder = QueryBuilder::<Sqlite>::new("select count(*) from product");
        push_filter(&mut query_builder, filter);

        let count: i64 = query_builder
            .build_query_scalar()
            .fetch_one(&self.reader)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn product_stats(&self) -> Result<CatalogStats, Self::Error> {
        // A single grouped scan, so the totals derived from it are consistent
        let by_category = sqlx::query_as::<_, CategoryRow>(
            r#"
            select
                category,
                count(*) as count,
                avg(price) as avg_price,
                min(price) as min_price,
                max(price) as max_price,
                total(price) as total_value,
                sum(in_stock) as in_stock
            from
                product
            group by
                category
            order by
                category asc
            "#,
        )
        .fetch_all(&self.reader)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<CategoryStats>, _>>()?;

        Ok(CatalogStats::from_categories(by_category))
    }
}

/// Append the `where` clause for a filter.
fn push_filter(query_builder: &mut QueryBuilder<'_, Sqlite>, filter: &ProductFilter) {
    if filter.is_unsatisfiable() {
        query_builder.push(" where 0");
        return;
    }

    query_builder.push(" where 1");

    if let Some(name) = &filter.name {
        query_builder
            .push(" and instr(name_folded, ")
            .push_bind(fold(name))
            .push(") > 0");
    }

    if let Some(categories) = &filter.categories {
        query_builder.push(" and category in (");
        let mut separated = query_builder.separated(", ");
        for category in categories {
            separated.push_bind(category.as_str().to_owned());
        }
        separated.push_unseparated(")");
    }

    if let Some(in_stock) = filter.in_stock {
        query_builder.push(" and in_stock = ").push_bind(in_stock);
    }

    if let Some(min_price) = filter.min_price {
        query_builder.push(" and price >= ").push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        query_builder.push(" and price <= ").push_bind(max_price);
    }

    if let Some(search) = &filter.search {
        query_builder
            .push(" and (instr(name_folded, ")
            .push_bind(fold(search))
            .push(") > 0 or instr(description_folded, ")
            .push_bind(fold(search))
            .push(") > 0)");
    }
}

/// Append the `order by` clause; ties are broken by id so pages are stable.
fn push_sort(query_builder: &mut QueryBuilder<'_, Sqlite>, sort: Sort) {
    let column = match sort.field {
        SortField::Name => "name",
        SortField::Price => "price",
        SortField::Category => "category",
        SortField::InStock => "in_stock",
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
    };
    let direction = if sort.descending { "desc" } else { "asc" };
    query_builder.push(format!(" order by {column} {direction}, id {direction}"));
}

/// The case-folded form text filters match against.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Translate a CHECK constraint violation into field errors. Any other
/// error is a genuine store failure and is handed back.
fn refusal(err: sqlx::Error) -> Result<ProductFailure, sqlx::Error> {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.kind() == ErrorKind::CheckViolation {
            let message = db_err.message();
            let (field, reason) = CONSTRAINTS
                .iter()
                .find(|(constraint, _, _)| message.contains(constraint))
                .map(|(_, field, reason)| (*field, *reason))
                .unwrap_or(("product", "violates a catalog constraint"));
            return Ok(ProductFailure::Invalid(vec![FieldError::new(field, reason)]));
        }
    }
    Err(err)
}

// constraint name, field, message; names match schema/0001_product.sql
const CONSTRAINTS: [(&str, &str, &str); 5] = [
    ("name_length", "name", "Product name must be 1 to 100 characters"),
    (
        "description_length",
        "description",
        "Product description must be 1 to 1000 characters",
    ),
    ("price_nonnegative", "price", "Price cannot be negative"),
    (
        "category_member",
        "category",
        "Category must be one of: electronics, clothing, home, kitchen, sports, other",
    ),
    ("in_stock_boolean", "inStock", "inStock must be a boolean"),
];
