use crate::{
    models::{CatalogStats, ProductData, ProductRecord},
    query::{ProductFilter, Sort, Window},
    validate::FieldError,
};
use std::future::Future;

/// The base trait of every repository, fixing the error, identifier, and
/// timestamp types the rest of the ports are expressed in.
pub trait Repository {
    /// The error type for failures of the underlying store
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier the store assigns to new products
    type ProductId;

    /// The timestamp type used for `createdAt`/`updatedAt`
    type DateTime;
}

/// Shorthand for the record type a repository produces.
pub type RecordOf<R> =
    ProductRecord<<R as Repository>::ProductId, <R as Repository>::DateTime>;

/// Reasons a write can be refused without the store itself failing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFailure {
    /// The targeted product does not exist
    DoesNotExist,
    /// The store's own constraints rejected the data
    Invalid(Vec<FieldError>),
}

/// Repository interface for the product catalog.
///
/// Writes return a nested `Result`: the outer error signals that the store
/// failed, the inner [`ProductFailure`] that the store refused the write.
pub trait ProductRepository: Repository {
    /// Insert a new product, assigning its id and timestamps.
    fn create_product(
        &self,
        data: ProductData,
    ) -> impl Future<Output = Result<Result<RecordOf<Self>, ProductFailure>, Self::Error>> + Send;

    /// Get a product by id.
    ///
    /// # Returns
    ///
    /// The record if it exists, None otherwise.
    fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<RecordOf<Self>>, Self::Error>> + Send;

    /// Replace the data of an existing product, refreshing `updatedAt`.
    fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
    ) -> impl Future<Output = Result<Result<RecordOf<Self>, ProductFailure>, Self::Error>> + Send;

    /// Permanently remove a product.
    fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Result<(), ProductFailure>, Self::Error>> + Send;

    /// Fetch the products matching `filter` in `sort` order, restricted to
    /// `window` when one is given.
    fn query_products(
        &self,
        filter: &ProductFilter,
        sort: Sort,
        window: Option<Window>,
    ) -> impl Future<Output = Result<Vec<RecordOf<Self>>, Self::Error>> + Send;

    /// Count the products matching `filter`.
    fn count_products(
        &self,
        filter: &ProductFilter,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Aggregate the whole catalog by category.
    fn product_stats(&self) -> impl Future<Output = Result<CatalogStats, Self::Error>> + Send;
}

/// The top-level trait an application implements to serve the catalog.
///
/// It ties a repository to the authorization policy of a deployment.
pub trait Application {
    /// Whatever the transport extracts from a request to authorize it
    type Context;

    /// The store holding the products
    type Repository: ProductRepository;

    /// Get the repository
    fn database(&self) -> &Self::Repository;

    /// Whether the context may create, update, or delete products
    fn can_manage_products(&self, context: &Self::Context) -> impl Future<Output = bool> + Send;
}
