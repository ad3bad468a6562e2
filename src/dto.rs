//! Serializable snapshot of a company.
//!
//! [`CompanyDocument`] flattens the aggregate into plain lists with
//! camelCase field names, suitable for JSON persistence or transport, and
//! can rebuild an equivalent [`Company`] from such a snapshot.

use serde::{Deserialize, Serialize};

use crate::company::{Company, CompanyError};
use crate::domain::LocationKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDto {
    pub name: String,
    /// Outstanding client demands in FIFO order.
    pub clients: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseDto {
    pub name: String,
    pub capacity: u32,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerDto {
    pub id: String,
    pub name: String,
    pub max_weight: u32,
    pub load: u32,
    /// Market names in visit order.
    pub markets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadDto {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// A complete company snapshot.
///
/// # Examples
///
/// ```
/// use delivery_routing::company::Company;
/// use delivery_routing::dto::CompanyDocument;
///
/// let mut company = Company::new("Acme Deliveries").unwrap();
/// company.add_site("HQ").unwrap();
/// company.add_market("Central Market").unwrap();
/// company.add_road("HQ", "Central Market", 4.0).unwrap();
///
/// let doc = CompanyDocument::from(&company);
/// assert_eq!(doc.company_name, "Acme Deliveries");
/// assert_eq!(doc.roads.len(), 1);
///
/// let restored = doc.to_company().unwrap();
/// assert_eq!(restored.roads().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDocument {
    pub company_name: String,
    /// Plain company sites (locations without an attached entity).
    pub sites: Vec<String>,
    pub markets: Vec<MarketDto>,
    pub warehouses: Vec<WarehouseDto>,
    pub sellers: Vec<SellerDto>,
    pub roads: Vec<RoadDto>,
}

impl From<&Company> for CompanyDocument {
    fn from(company: &Company) -> Self {
        Self {
            company_name: company.name().to_owned(),
            sites: company
                .network()
                .vertices()
                .filter(|l| l.kind() == LocationKind::Company)
                .map(|l| l.name().to_owned())
                .collect(),
            markets: company
                .markets()
                .iter()
                .map(|m| MarketDto {
                    name: m.name().to_owned(),
                    clients: m.clients().collect(),
                })
                .collect(),
            warehouses: company
                .warehouses()
                .iter()
                .map(|w| WarehouseDto {
                    name: w.name().to_owned(),
                    capacity: w.capacity(),
                    stock: w.stock(),
                })
                .collect(),
            sellers: company
                .sellers()
                .iter()
                .map(|s| SellerDto {
                    id: s.id().to_owned(),
                    name: s.name().to_owned(),
                    max_weight: s.capacity(),
                    load: s.load(),
                    markets: s.markets_to_visit().map(str::to_owned).collect(),
                })
                .collect(),
            roads: company
                .roads()
                .map(|p| RoadDto {
                    from: p.start.name().to_owned(),
                    to: p.destination.name().to_owned(),
                    distance: p.weight,
                })
                .collect(),
        }
    }
}

impl CompanyDocument {
    /// Rebuilds a company from the snapshot.
    ///
    /// Registration order follows the document lists, so an immediate
    /// re-snapshot yields an equal document.
    pub fn to_company(&self) -> Result<Company, CompanyError> {
        let mut company = Company::new(self.company_name.clone())?;
        for site in &self.sites {
            company.add_site(site.clone())?;
        }
        for market in &self.markets {
            company.add_market(market.name.clone())?;
            if let Some(m) = company.market_mut(&market.name) {
                for &demand in &market.clients {
                    m.add_client(demand)?;
                }
            }
        }
        for warehouse in &self.warehouses {
            company.add_warehouse(warehouse.name.clone(), warehouse.capacity)?;
            if warehouse.stock > 0 {
                if let Some(w) = company.warehouse_mut(&warehouse.name) {
                    w.load_stock(warehouse.stock)?;
                }
            }
        }
        for seller in &self.sellers {
            company.add_seller(seller.id.clone(), seller.name.clone(), seller.max_weight)?;
            if let Some(s) = company.seller_mut(&seller.id) {
                if seller.load > 0 {
                    s.load_goods(seller.load)?;
                }
                for market in &seller.markets {
                    s.add_market_to_visit(market.clone())?;
                }
            }
        }
        for road in &self.roads {
            company.add_road(&road.from, &road.to, road.distance)?;
        }
        Ok(company)
    }
}
