//! Built-in menu data

use shared::{Category, MenuItem};

fn category(id: &str, name: &str, icon: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn item(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image: &str,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: image.to_string(),
        original_price: None,
        is_offer: None,
        includes_drink: None,
    }
}

fn with_drink(mut item: MenuItem) -> MenuItem {
    item.includes_drink = Some(true);
    item
}

pub(super) fn categories() -> Vec<Category> {
    vec![
        category("pollos", "Pollos a la Brasa", "🔥"),
        category("parrillas", "Parrillas", "🥩"),
        category("broaster", "Broaster", "🍗"),
        category("acompañamientos", "Acompañamientos", "🍟"),
        category("bebidas", "Bebidas", "🥤"),
        category("postres", "Postres", "🍰"),
    ]
}

pub(super) fn menu_items() -> Vec<MenuItem> {
    vec![
        // pollos
        item(
            "1",
            "POLLO A LA BRASA & 1/4",
            "Pollo & 1/4 + papas fritas + ensalada. Ideal para 4-5 personas",
            76.0,
            "pollos",
            "pollo/pollo_cuarto.png",
        ),
        with_drink(item(
            "2",
            "POLLO A LA BRASA & 1/4 + Gaseosa 1.5L",
            "Pollo & 1/4 + papas fritas + ensalada + gaseosa 1.5L . Ideal para 4-5 personas",
            85.0,
            "pollos",
            "pollo/pollo_cuarto.png",
        )),
        with_drink(item(
            "3",
            "POLLO A LA BRASA + Gaseosa 1.5L",
            "Pollo + papas fritas + ensalada + Gaseosa 1.5L. Ideal para 3-4 personas",
            74.0,
            "pollos",
            "pollo/pollo.png",
        )),
        item(
            "4",
            "POLLO A LA BRASA",
            "Pollo + papas fritas + ensalada. Ideal para 3-4 personas",
            76.0,
            "pollos",
            "pollo/pollo.png",
        ),
        // parrillas
        item(
            "5",
            "CHURRASCO DE 250 GR.",
            "6 Mollejas + 1 Chorizo + Papas fritas + Ensalada",
            30.0,
            "parrillas",
            "parrilla/churrasco.png",
        ),
        item(
            "6",
            "PECHUGA A LA PARRILLA DE 250 GR.",
            "6 mollejas + 1 chorizo parrillero + papas fritas + ensalada",
            25.0,
            "parrillas",
            "parrilla/pechuga.png",
        ),
        item(
            "7",
            "CHULETA DE 250 GR.",
            "Chorizo artesanal a la parrilla, servido con pan y salsa criolla",
            28.0,
            "parrillas",
            "parrilla/chuleta.png",
        ),
        item(
            "8",
            "BRASA PARRILLA",
            "1/4 de pollo + 2 palitos anticuchos + 1 chorizo + papas fritas + ensalada",
            30.0,
            "parrillas",
            "parrilla/brasa.png",
        ),
        // acompañamientos
        item(
            "9",
            "Papas Fritas Grandes",
            "Papas cortadas a mano y fritas hasta dorar",
            8.0,
            "acompañamientos",
            "https://images.pexels.com/photos/1583884/pexels-photo-1583884.jpeg?auto=compress&cs=tinysrgb&w=800",
        ),
        item(
            "10",
            "Ensalada Mixta",
            "Lechuga, tomate, pepino, cebolla roja con vinagreta",
            6.0,
            "acompañamientos",
            "https://images.pexels.com/photos/1213710/pexels-photo-1213710.jpeg?auto=compress&cs=tinysrgb&w=800",
        ),
        item(
            "11",
            "Arroz con Frijoles",
            "Arroz blanco con menestras de frijoles canarios",
            10.0,
            "acompañamientos",
            "https://images.pexels.com/photos/7613568/pexels-photo-7613568.jpeg?auto=compress&cs=tinysrgb&w=800",
        ),
        // bebidas
        item(
            "12",
            "Inca Kola 1.5L",
            "La bebida del sabor nacional",
            8.0,
            "bebidas",
            "https://images.pexels.com/photos/544961/pexels-photo-544961.jpeg?auto=compress&cs=tinysrgb&w=800",
        ),
        item(
            "13",
            "Chicha Morada",
            "Chicha morada natural con piña y canela",
            5.0,
            "bebidas",
            "https://images.pexels.com/photos/1233319/pexels-photo-1233319.jpeg?auto=compress&cs=tinysrgb&w=800",
        ),
        // postres
        item(
            "14",
            "Picarones",
            "6 picarones caseros con miel de chancaca",
            8.0,
            "postres",
            "https://images.pexels.com/photos/1126728/pexels-photo-1126728.jpeg?auto=compress&cs=tinysrgb&w=800",
        ),
        // broaster
        item(
            "15",
            "1/4 DE BROASTER",
            "papas fritas + ensalada",
            20.0,
            "broaster",
            "/broaster/broaster.webp",
        ),
        item(
            "16",
            "1/4 DE BROASTER CON CHAUFA",
            "papas fritas + ensalada",
            22.0,
            "broaster",
            "/broaster/broaster_chaufa.png",
        ),
        item(
            "17",
            "1/8 DE BROASTER + CHAUFA",
            "CHAUFA + papas fritas + ensalada",
            13.0,
            "broaster",
            "/broaster/broaster_chaufa.png",
        ),
        item(
            "18",
            "1/8 DE BROASTER + CHAUFA + GASEOSA DE 355ML",
            "CHAUFA + papas fritas + ensalada + gaseosa de 355ml",
            14.0,
            "broaster",
            "/broaster/broaster_chaufa.png",
        ),
        item(
            "19",
            "1/8 DE BROASTER A LO POBRE",
            "papas fritas + platano + huevo frito + ensalada",
            18.0,
            "broaster",
            "broaster/broaster_mas_pobre.png",
        ),
        item(
            "20",
            "BROASTER FAMILIAR",
            "10 piezas de pollo broaster + papas fritas + ensalada",
            75.0,
            "broaster",
            "/broaster/broaster.webp",
        ),
        item(
            "21",
            "BROASTER MEDIANO",
            "5 piezas de pollo broaster + papas fritas + ensalada",
            45.0,
            "broaster",
            "/broaster/broaster.webp",
        ),
        item(
            "22",
            "1/4 DE BROASTER A LO POBRE",
            "papas fritas + platano + huevo frito + ensalada",
            24.0,
            "broaster",
            "/broaster/broaster_pobre.png",
        ),
    ]
}
