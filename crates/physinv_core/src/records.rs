use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::odata;

/// `A_PhysInventoryDocHeader` entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Header {
    #[serde(deserialize_with = "odata::null_default")]
    pub fiscal_year: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_document: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub inventory_transaction_type: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub plant: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub storage_location: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub inventory_special_stock_type: String,
    #[serde(deserialize_with = "odata::date_opt")]
    pub document_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odata::date_opt")]
    pub phys_inventory_planned_count_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odata::date_opt")]
    pub physical_inventory_last_count_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odata::date_opt")]
    pub posting_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odata::null_default")]
    pub fiscal_period: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub posting_is_blocked_for_phys_invtry: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_count_status: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_adjustment_posting_sts: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_deletion_status: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_doc_has_qty_snapshot: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_group_type: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_group: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_number: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_inventory_reference_number: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_document_desc: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_type: String,
    /// Absolute URL of the related item collection.
    #[serde(
        rename(deserialize = "to_PhysicalInventoryDocumentItem", serialize = "ToItem"),
        deserialize_with = "odata::deferred_uri"
    )]
    pub to_item: Option<String>,
}

/// `A_PhysInventoryDocItem` entity, fetched either directly or through a
/// header's navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InventoryItem {
    #[serde(deserialize_with = "odata::null_default")]
    pub fiscal_year: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_document: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_document_item: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub plant: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub storage_location: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub material: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub batch: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub inventory_special_stock_type: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub stock_type: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub sales_order: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub sales_order_item: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub supplier: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub customer: String,
    #[serde(rename = "WBSElement", deserialize_with = "odata::null_default")]
    pub wbs_element: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub last_change_user: String,
    #[serde(deserialize_with = "odata::date_opt")]
    pub last_change_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odata::null_default")]
    pub counted_by_user: String,
    #[serde(deserialize_with = "odata::date_opt")]
    pub physical_inventory_last_count_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odata::null_default")]
    pub adjustment_posting_made_by_user: String,
    #[serde(deserialize_with = "odata::date_opt")]
    pub posting_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_item_is_counted: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_difference_is_posted: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_item_is_recounted: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_item_is_deleted: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub is_handled_in_altv_unit_of_msr: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub cycle_count_type: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub is_value_only_material: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_inventory_reference_number: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub material_document: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub material_document_year: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub material_document_item: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_recount_document: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub physical_inventory_item_is_zero: bool,
    #[serde(deserialize_with = "odata::null_default")]
    pub reason_for_phys_invtry_difference: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub material_base_unit: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub book_qty_bfr_count_in_matl_base_unit: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub quantity: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub unit_of_entry: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub quantity_in_unit_of_entry: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub currency: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub difference_amount_in_co_code_crcy: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub entered_sls_amt_in_co_code_crcy: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub sls_price_amount_in_co_code_crcy: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub phys_invtry_ct_amt_in_co_code_crcy: String,
    #[serde(deserialize_with = "odata::null_default")]
    pub book_qty_amount_in_co_code_crcy: String,
}

/// Item fetched directly with a filter.
pub type Item = InventoryItem;

/// Item reached through [`Header::to_item`].
pub type ToItem = InventoryItem;
